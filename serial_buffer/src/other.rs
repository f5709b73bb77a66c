use crate::{Decode, Encode, Result, SerialBuffer};

impl<T: Encode + ?Sized> Encode for &T {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		(**self).encode_into(buffer);
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	#[inline]
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		(**self).encode_into(buffer);
	}
}

impl<T: Decode> Decode for Box<T> {
	#[inline]
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		T::decode_from(buffer).map(Box::new)
	}
}

/// `Option<T>` is a `bool` presence flag, followed by the value if present.
impl<T: Encode> Encode for Option<T> {
	fn encode_into(&self, buffer: &mut SerialBuffer) {
		match self {
			Some(value) => {
				true.encode_into(buffer);
				value.encode_into(buffer);
			}
			None => false.encode_into(buffer),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
		if bool::decode_from(buffer)? {
			T::decode_from(buffer).map(Some)
		} else {
			Ok(None)
		}
	}
}

impl Encode for () {
	#[inline(always)]
	fn encode_into(&self, _buffer: &mut SerialBuffer) {}
}

impl Decode for () {
	#[inline(always)]
	fn decode_from(_buffer: &mut SerialBuffer) -> Result<Self> {
		Ok(())
	}
}

// Tuples are encoded like a record with unnamed fields
macro_rules! impl_tuple {
	() => {};
	($first:ident, $($rest:ident,)*) => {
		impl<$first: Encode, $($rest: Encode,)*> Encode for ($first, $($rest,)*) {
			#[allow(non_snake_case)]
			fn encode_into(&self, buffer: &mut SerialBuffer) {
				let ($first, $($rest,)*) = self;
				$first.encode_into(buffer);
				$($rest.encode_into(buffer);)*
			}
		}

		impl<$first: Decode, $($rest: Decode,)*> Decode for ($first, $($rest,)*) {
			fn decode_from(buffer: &mut SerialBuffer) -> Result<Self> {
				Ok(($first::decode_from(buffer)?, $($rest::decode_from(buffer)?,)*))
			}
		}

		impl_tuple!($($rest,)*);
	};
}

impl_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11,);
