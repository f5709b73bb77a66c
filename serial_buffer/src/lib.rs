//! Positional binary encoding of records into a flat byte buffer.
//!
//! A record is encoded as the concatenation of its fields' encodings, in
//! declared order. Nothing in the output describes the data: no field names,
//! no tags, no record length, no version. The reader must already know the
//! record's shape, and read it back in the same order it was written.
//!
//! * Scalars are written at their natural width in the configured byte order.
//! * Text is a length prefix (number of UTF-8 bytes) followed by the bytes.
//! * Variable-length sequences are a count prefix followed by each element.
//! * Fixed-length arrays are their elements, with no prefix.
//! * Nested records are their own encoding, with no framing around them.
//!
//! ```
//! use serial_buffer::{decode, encode, Decode, Encode};
//!
//! #[derive(Encode, Decode, Debug, PartialEq)]
//! struct Entry {
//! 	flag: bool,
//! 	count: u32,
//! 	label: String,
//! }
//!
//! let entry = Entry { flag: true, count: 5, label: "ab".to_string() };
//! let bytes = encode(&entry);
//! assert_eq!(
//! 	bytes,
//! 	[1, 5, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, b'a', b'b']
//! );
//! assert_eq!(decode::<Entry>(&bytes).unwrap(), entry);
//! ```

#[cfg(feature = "derive")]
pub use serial_buffer_derive::{Decode, Encode};

mod buffer;
pub use buffer::{Mode, SerialBuffer};

mod config;
pub use config::{Config, Endian, PrefixWidth};

mod error;
pub use error::{Error, Result};

mod sink;
pub use sink::{FileSink, MemorySink, Sink};

pub mod schema;
pub mod value;
pub use value::Value;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "num_bigint")]
mod bigint;
mod other;
mod primitives;
mod sequences;

/// Trait for types which can be written into a [`SerialBuffer`].
///
/// Implementations must write their fields in a fixed order, which
/// [`Decode::decode_from`] reads back in the same order.
pub trait Encode {
	/// Append encoding of `self` to `buffer`.
	///
	/// `buffer` must be in write mode.
	fn encode_into(&self, buffer: &mut SerialBuffer);
}

/// Trait for types which can be read out of a [`SerialBuffer`].
pub trait Decode: Sized {
	/// Consume encoding of a value from `buffer`.
	///
	/// `buffer` must be in read mode.
	fn decode_from(buffer: &mut SerialBuffer) -> Result<Self>;
}

/// Trait for use with `#[serial_with]`.
///
/// Encodes a `T` on its behalf, for types which do not implement [`Encode`]
/// themselves (e.g. types from other crates).
pub trait EncodeWith<T: ?Sized> {
	fn encode_with(value: &T, buffer: &mut SerialBuffer);
}

/// Trait for use with `#[serial_with]`.
///
/// Counterpart of [`EncodeWith`].
pub trait DecodeWith<T> {
	fn decode_with(buffer: &mut SerialBuffer) -> Result<T>;
}

/// Encode `value` with default [`Config`].
pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
	encode_with(value, Config::default())
}

/// Encode `value` with the given [`Config`].
///
/// Uses a fresh buffer, which is consumed to produce the output.
pub fn encode_with<T: Encode + ?Sized>(value: &T, config: Config) -> Vec<u8> {
	let mut buffer = SerialBuffer::begin_write(config);
	value.encode_into(&mut buffer);
	buffer.finish()
}

/// Decode a `T` from `bytes` with default [`Config`].
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T> {
	decode_with(bytes, Config::default())
}

/// Decode a `T` from `bytes` with the given [`Config`].
///
/// `bytes` must contain exactly one encoded `T`. Leftover bytes are reported
/// as [`Error::TrailingBytes`].
pub fn decode_with<T: Decode>(bytes: &[u8], config: Config) -> Result<T> {
	let mut buffer = SerialBuffer::begin_read(bytes, config);
	decode_all(&mut buffer)
}

/// Encode `value` with default [`Config`] and store it under `key` in `sink`.
pub fn save<T, S>(value: &T, sink: &mut S, key: &str) -> Result<()>
where
	T: Encode + ?Sized,
	S: Sink + ?Sized,
{
	save_with(value, sink, key, Config::default())
}

/// Encode `value` with the given [`Config`] and store it under `key` in
/// `sink`.
pub fn save_with<T, S>(value: &T, sink: &mut S, key: &str, config: Config) -> Result<()>
where
	T: Encode + ?Sized,
	S: Sink + ?Sized,
{
	let mut buffer = SerialBuffer::begin_write(config);
	value.encode_into(&mut buffer);
	buffer.save_to(sink, key)
}

/// Load bytes stored under `key` in `sink` and decode a `T` from them with
/// default [`Config`].
pub fn load<T: Decode, S: Sink + ?Sized>(sink: &mut S, key: &str) -> Result<T> {
	load_with(sink, key, Config::default())
}

/// Load bytes stored under `key` in `sink` and decode a `T` from them with the
/// given [`Config`].
pub fn load_with<T: Decode, S: Sink + ?Sized>(sink: &mut S, key: &str, config: Config) -> Result<T> {
	let mut buffer = SerialBuffer::begin_read(Vec::<u8>::new(), config);
	buffer.load_from(sink, key)?;
	decode_all(&mut buffer)
}

fn decode_all<T: Decode>(buffer: &mut SerialBuffer) -> Result<T> {
	let value = T::decode_from(buffer)?;
	match buffer.remaining() {
		0 => Ok(value),
		remaining => Err(Error::TrailingBytes { remaining }),
	}
}
