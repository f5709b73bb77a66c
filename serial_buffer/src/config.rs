//! Encoding configuration.
//!
//! The byte stream carries no description of how it was written, so reader and
//! writer must agree on a [`Config`] out of band. Every [`SerialBuffer`] holds
//! one, and every scalar and length prefix passing through that buffer obeys
//! it.
//!
//! [`SerialBuffer`]: crate::SerialBuffer

/// Byte order of multi-byte scalars and length prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
	Little,
	Big,
}

impl Endian {
	/// Byte order of the host this code was compiled for.
	#[cfg(target_endian = "little")]
	pub const NATIVE: Endian = Endian::Little;
	#[cfg(target_endian = "big")]
	pub const NATIVE: Endian = Endian::Big;
}

impl Default for Endian {
	#[inline]
	fn default() -> Self {
		Endian::Little
	}
}

/// Width of the length prefix written before text and the count prefix
/// written before variable-length sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefixWidth {
	U32,
	U64,
}

impl PrefixWidth {
	/// Number of bytes a prefix occupies in output.
	#[inline]
	pub const fn size(self) -> usize {
		match self {
			PrefixWidth::U32 => 4,
			PrefixWidth::U64 => 8,
		}
	}

	/// Largest length which can be represented by a prefix of this width.
	#[inline]
	pub const fn max_len(self) -> u64 {
		match self {
			PrefixWidth::U32 => u32::MAX as u64,
			PrefixWidth::U64 => u64::MAX,
		}
	}
}

impl Default for PrefixWidth {
	#[inline]
	fn default() -> Self {
		PrefixWidth::U64
	}
}

/// Encoding options shared by writer and reader.
///
/// Default is little-endian with 64-bit length prefixes.
///
/// ```
/// use serial_buffer::{Config, Endian, PrefixWidth};
///
/// let config = Config::new().big_endian().prefix_width(PrefixWidth::U32);
/// assert_eq!(config.endian, Endian::Big);
/// assert_eq!(config.prefix.size(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Config {
	pub endian: Endian,
	pub prefix: PrefixWidth,
}

impl Config {
	/// Create default config: little-endian, 64-bit prefixes.
	#[inline]
	pub const fn new() -> Self {
		Config {
			endian: Endian::Little,
			prefix: PrefixWidth::U64,
		}
	}

	#[inline]
	pub const fn endian(mut self, endian: Endian) -> Self {
		self.endian = endian;
		self
	}

	#[inline]
	pub const fn little_endian(self) -> Self {
		self.endian(Endian::Little)
	}

	#[inline]
	pub const fn big_endian(self) -> Self {
		self.endian(Endian::Big)
	}

	#[inline]
	pub const fn native_endian(self) -> Self {
		self.endian(Endian::NATIVE)
	}

	#[inline]
	pub const fn prefix_width(mut self, prefix: PrefixWidth) -> Self {
		self.prefix = prefix;
		self
	}
}
