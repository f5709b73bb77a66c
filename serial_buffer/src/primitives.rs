use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{Decode, Encode, Endian, Error, Result, SerialBuffer};

// Single-byte types have no byte order
impl Encode for u8 {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		buffer.write(&[*self]);
	}
}

impl Decode for u8 {
	#[inline]
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let [byte] = buffer.read_array::<1>()?;
		Ok(byte)
	}
}

impl Encode for i8 {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		buffer.write(&self.to_ne_bytes());
	}
}

impl Decode for i8 {
	#[inline]
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		Ok(i8::from_ne_bytes(buffer.read_array::<1>()?))
	}
}

impl Encode for bool {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		buffer.write(&[*self as u8]);
	}
}

impl Decode for bool {
	#[inline]
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		match u8::decode_from(buffer)? {
			0 => Ok(false),
			1 => Ok(true),
			byte => Err(Error::invalid_data(format!(
				"expected 0 or 1 for bool, found {byte:#04x}"
			))),
		}
	}
}

macro_rules! impl_primitive {
	($ty:ty, $size:literal, $write:ident, $read:ident) => {
		impl Encode for $ty {
			#[inline]
			fn encode_into(&self, buffer: &mut SerialBuffer) {
				let mut bytes = [0u8; $size];
				match buffer.config().endian {
					Endian::Little => LittleEndian::$write(&mut bytes, *self),
					Endian::Big => BigEndian::$write(&mut bytes, *self),
				}
				buffer.write(&bytes);
			}
		}

		impl Decode for $ty {
			#[inline]
			fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
				let endian = buffer.config().endian;
				let bytes = buffer.read_array::<$size>()?;
				Ok(match endian {
					Endian::Little => LittleEndian::$read(&bytes),
					Endian::Big => BigEndian::$read(&bytes),
				})
			}
		}
	};
}

impl_primitive!(u16, 2, write_u16, read_u16);
impl_primitive!(u32, 4, write_u32, read_u32);
impl_primitive!(u64, 8, write_u64, read_u64);
impl_primitive!(u128, 16, write_u128, read_u128);

impl_primitive!(i16, 2, write_i16, read_i16);
impl_primitive!(i32, 4, write_i32, read_i32);
impl_primitive!(i64, 8, write_i64, read_i64);
impl_primitive!(i128, 16, write_i128, read_i128);

impl_primitive!(f32, 4, write_f32, read_f32);
impl_primitive!(f64, 8, write_f64, read_f64);
