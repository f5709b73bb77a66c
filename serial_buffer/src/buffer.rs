use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::trace;

use crate::{Config, Endian, Error, PrefixWidth, Result, Sink};

/// Whether a [`SerialBuffer`] is being written to or read from.
///
/// Fixed when the buffer is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	Read,
	Write,
}

/// Flat byte buffer which records are encoded into, or decoded out of.
///
/// A buffer operates in exactly one [`Mode`] for its whole life:
///
/// * Write mode: every [`write`](Self::write) appends to the end.
/// * Read mode: every [`read`](Self::read) consumes exactly the requested
///   number of bytes from the cursor onwards, and moves the cursor forward.
///   The cursor never passes the end of the bytes.
///
/// The buffer knows nothing about types. It moves raw byte spans only.
/// [`Encode`](crate::Encode) and [`Decode`](crate::Decode) impls give those
/// bytes meaning, so a reader must request the same widths, in the same order,
/// as the writer produced them.
///
/// Using a buffer in the wrong mode is a bug in calling code, and panics.
///
/// ```
/// use serial_buffer::{Config, SerialBuffer};
///
/// let mut buf = SerialBuffer::begin_write(Config::default());
/// buf.write(&[1, 2, 3]);
/// let bytes = buf.finish();
///
/// let mut buf = SerialBuffer::begin_read(bytes, Config::default());
/// assert_eq!(buf.read(2).unwrap(), &[1, 2]);
/// assert!(buf.read(2).is_err());
/// assert_eq!(buf.read(1).unwrap(), &[3]);
/// ```
#[derive(Debug)]
pub struct SerialBuffer {
	bytes: Vec<u8>,
	cursor: usize,
	mode: Mode,
	config: Config,
}

impl SerialBuffer {
	/// Create empty buffer in write mode.
	/// Memory will be allocated when first bytes are written.
	pub fn begin_write(config: Config) -> Self {
		SerialBuffer {
			bytes: Vec::new(),
			cursor: 0,
			mode: Mode::Write,
			config,
		}
	}

	/// Create empty buffer in write mode with `capacity` bytes pre-allocated.
	///
	/// If you know, or can estimate, the size of the output in advance,
	/// allocating upfront avoids repeated reallocation as the buffer grows.
	pub fn with_capacity(config: Config, capacity: usize) -> Self {
		SerialBuffer {
			bytes: Vec::with_capacity(capacity),
			cursor: 0,
			mode: Mode::Write,
			config,
		}
	}

	/// Create buffer in read mode over `bytes`, with cursor at the start.
	pub fn begin_read(bytes: impl Into<Vec<u8>>, config: Config) -> Self {
		SerialBuffer {
			bytes: bytes.into(),
			cursor: 0,
			mode: Mode::Read,
			config,
		}
	}

	#[inline]
	pub fn mode(&self) -> Mode {
		self.mode
	}

	#[inline]
	pub fn config(&self) -> Config {
		self.config
	}

	/// Get number of bytes consumed so far. Always 0 in write mode.
	#[inline]
	pub fn position(&self) -> usize {
		self.cursor
	}

	/// Get number of bytes not yet consumed. Always 0 in write mode.
	#[inline]
	pub fn remaining(&self) -> usize {
		match self.mode {
			Mode::Read => self.bytes.len() - self.cursor,
			Mode::Write => 0,
		}
	}

	/// Get total number of bytes held.
	#[inline]
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Get all bytes held, regardless of cursor position.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume buffer and return its bytes.
	#[inline]
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}

	/// Append `span` to the buffer.
	///
	/// # Panics
	///
	/// Panics if buffer is not in write mode.
	#[inline]
	#[track_caller]
	pub fn write(&mut self, span: &[u8]) {
		self.assert_mode(Mode::Write);
		self.bytes.extend_from_slice(span);
	}

	/// Consume exactly `len` bytes from the cursor onwards.
	///
	/// If fewer than `len` bytes remain, returns [`Error::BufferUnderrun`]
	/// and the cursor is left where it was.
	///
	/// # Panics
	///
	/// Panics if buffer is not in read mode.
	#[track_caller]
	pub fn read(&mut self, len: usize) -> Result<&[u8]> {
		self.assert_mode(Mode::Read);

		let start = self.cursor;
		let remaining = self.bytes.len() - start;
		if len > remaining {
			return Err(Error::BufferUnderrun {
				requested: len,
				remaining,
				position: start,
			});
		}

		self.cursor = start + len;
		Ok(&self.bytes[start..self.cursor])
	}

	/// Consume exactly `N` bytes and return them as an array.
	///
	/// Scalar decoders go through this, so the width of the span is always
	/// checked against the width of the type before it's interpreted.
	#[inline]
	#[track_caller]
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let span = self.read(N)?;
		let mut out = [0u8; N];
		out.copy_from_slice(span);
		Ok(out)
	}

	/// Write a length or count prefix, in the configured width and byte order.
	///
	/// # Panics
	///
	/// Panics if buffer is not in write mode, or if `len` cannot be
	/// represented in the configured prefix width. Callers must not encode
	/// sequences longer than the prefix can describe.
	#[track_caller]
	pub fn write_len(&mut self, len: usize) {
		let len = len as u64;
		let prefix = self.config.prefix;
		assert!(
			len <= prefix.max_len(),
			"length {} does not fit in a {}-byte prefix",
			len,
			prefix.size()
		);

		match prefix {
			PrefixWidth::U32 => {
				let mut bytes = [0u8; 4];
				match self.config.endian {
					Endian::Little => LittleEndian::write_u32(&mut bytes, len as u32),
					Endian::Big => BigEndian::write_u32(&mut bytes, len as u32),
				}
				self.write(&bytes);
			}
			PrefixWidth::U64 => {
				let mut bytes = [0u8; 8];
				match self.config.endian {
					Endian::Little => LittleEndian::write_u64(&mut bytes, len),
					Endian::Big => BigEndian::write_u64(&mut bytes, len),
				}
				self.write(&bytes);
			}
		}
	}

	/// Read a length or count prefix, in the configured width and byte order.
	#[track_caller]
	pub fn read_len(&mut self) -> Result<usize> {
		let endian = self.config.endian;
		let len = match self.config.prefix {
			PrefixWidth::U32 => {
				let bytes = self.read_array::<4>()?;
				match endian {
					Endian::Little => LittleEndian::read_u32(&bytes) as u64,
					Endian::Big => BigEndian::read_u32(&bytes) as u64,
				}
			}
			PrefixWidth::U64 => {
				let bytes = self.read_array::<8>()?;
				match endian {
					Endian::Little => LittleEndian::read_u64(&bytes),
					Endian::Big => BigEndian::read_u64(&bytes),
				}
			}
		};
		usize::try_from(len).map_err(|_| Error::LengthOverflow { len })
	}

	/// Replace contents of buffer with the bytes stored under `key` in `sink`,
	/// and reset cursor to the start.
	///
	/// On failure, buffer is left unchanged.
	///
	/// # Panics
	///
	/// Panics if buffer is not in read mode.
	#[track_caller]
	pub fn load_from<S: Sink + ?Sized>(&mut self, sink: &mut S, key: &str) -> Result<()> {
		self.assert_mode(Mode::Read);
		let bytes = sink.load(key)?;
		trace!(key, len = bytes.len(), "loaded buffer");
		self.bytes = bytes;
		self.cursor = 0;
		Ok(())
	}

	/// Store entire contents of buffer under `key` in `sink`.
	pub fn save_to<S: Sink + ?Sized>(&self, sink: &mut S, key: &str) -> Result<()> {
		sink.save(key, &self.bytes)?;
		trace!(key, len = self.bytes.len(), "saved buffer");
		Ok(())
	}

	#[inline]
	#[track_caller]
	fn assert_mode(&self, expected: Mode) {
		assert!(
			self.mode == expected,
			"SerialBuffer is in {:?} mode, cannot be used in {:?} mode",
			self.mode,
			expected
		);
	}
}
