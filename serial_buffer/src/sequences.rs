use std::mem;

use crate::{Decode, Encode, Error, Result, SerialBuffer};

/// Largest count accepted for a sequence whose elements occupy no bytes.
/// Remaining input does not bound the count of such a sequence.
pub(crate) const MAX_EMPTY_ELEMENTS: usize = 1 << 20;

impl Encode for str {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		// Length is in bytes, not chars
		buffer.write_len(self.len());
		buffer.write(self.as_bytes());
	}
}

impl Encode for String {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		self.as_str().encode_into(buffer);
	}
}

impl Decode for String {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let len = buffer.read_len()?;
		let bytes = buffer.read(len)?.to_vec();
		Ok(String::from_utf8(bytes)?)
	}
}

impl<T: Encode> Encode for [T] {
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		buffer.write_len(self.len());
		for value in self {
			value.encode_into(buffer);
		}
	}
}

impl<T: Encode> Encode for Vec<T> {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		self.as_slice().encode_into(buffer);
	}
}

impl<T: Decode> Decode for Vec<T> {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let len = buffer.read_len()?;

		// Each element which isn't zero-sized consumes at least 1 byte,
		// so no valid count exceeds bytes remaining
		let capacity = if mem::size_of::<T>() == 0 {
			0
		} else {
			len.min(buffer.remaining())
		};

		let mut vec = Vec::with_capacity(capacity);
		let start = buffer.position();
		for _ in 0..len {
			vec.push(T::decode_from(buffer)?);
			// Decoding is a function of the bytes, so if the first element
			// consumed none, none of the others will either
			if len > MAX_EMPTY_ELEMENTS && buffer.position() == start {
				return Err(Error::invalid_data(format!(
					"{len} sequence elements which occupy no bytes, limit is {MAX_EMPTY_ELEMENTS}"
				)));
			}
		}
		Ok(vec)
	}
}

// Length of fixed-size arrays is part of the type, so no prefix is written
impl<T: Encode, const N: usize> Encode for [T; N] {
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		for value in self {
			value.encode_into(buffer);
		}
	}
}

impl<T: Decode, const N: usize> Decode for [T; N] {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		let mut vec = Vec::with_capacity(N);
		for _ in 0..N {
			vec.push(T::decode_from(buffer)?);
		}
		vec.try_into().map_err(|vec: Vec<T>| {
			Error::invalid_data(format!("expected {} array elements, got {}", N, vec.len()))
		})
	}
}
