use num_bigint::{BigInt, BigUint, Sign};

use crate::{Decode, Encode, Endian, Error, Result, SerialBuffer};

// `BigUint` is encoded like a `Vec<u8>` of its magnitude, with the magnitude
// in the buffer's byte order. Zero is an empty magnitude.
impl Encode for BigUint {
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		let bytes = match buffer.config().endian {
			Endian::Little => self.to_bytes_le(),
			Endian::Big => self.to_bytes_be(),
		};
		// `to_bytes_*` produces `[0]` for zero
		let bytes = if bytes == [0] { &[][..] } else { &bytes[..] };
		buffer.write_len(bytes.len());
		buffer.write(bytes);
	}
}

impl Decode for BigUint {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let endian = buffer.config().endian;
		let len = buffer.read_len()?;
		let bytes = buffer.read(len)?;
		Ok(match endian {
			Endian::Little => BigUint::from_bytes_le(bytes),
			Endian::Big => BigUint::from_bytes_be(bytes),
		})
	}
}

// `BigInt` is an `i8` sign (-1, 0 or 1) followed by `BigUint` magnitude
impl Encode for BigInt {
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		let sign: i8 = match self.sign() {
			Sign::Minus => -1,
			Sign::NoSign => 0,
			Sign::Plus => 1,
		};
		sign.encode_into(buffer);
		self.magnitude().encode_into(buffer);
	}
}

impl Decode for BigInt {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let sign = match i8::decode_from(buffer)? {
			-1 => Sign::Minus,
			0 => Sign::NoSign,
			1 => Sign::Plus,
			sign => return Err(Error::invalid_data(format!("invalid BigInt sign {sign}"))),
		};
		let magnitude = BigUint::decode_from(buffer)?;
		if (sign == Sign::NoSign) != (magnitude.bits() == 0) {
			return Err(Error::invalid_data("BigInt sign does not agree with magnitude"));
		}
		Ok(BigInt::from_biguint(sign, magnitude))
	}
}
