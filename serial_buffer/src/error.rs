//! Error type for decoding, persistence and schema handling.
//!
//! Writing to a buffer cannot fail. Using a buffer in the wrong mode is a
//! programming error and panics rather than producing an [`Error`].

use std::{io, string::FromUtf8Error};

use thiserror::Error;

/// Errors which can occur while decoding, loading/saving, or working with a
/// [`Schema`](crate::schema::Schema).
#[derive(Debug, Error)]
pub enum Error {
	/// A read asked for more bytes than remain after the cursor.
	///
	/// Signals truncated input, or a reader whose field list does not match
	/// the writer's.
	#[error("buffer underrun: requested {requested} bytes at position {position}, only {remaining} remaining")]
	BufferUnderrun {
		requested: usize,
		remaining: usize,
		position: usize,
	},

	/// A length or count prefix is larger than this platform can address.
	#[error("length prefix {len} does not fit in usize")]
	LengthOverflow { len: u64 },

	/// Text bytes were not valid UTF-8.
	#[error("invalid UTF-8 in text field: {0}")]
	InvalidUtf8(#[from] FromUtf8Error),

	/// Bytes decoded, but do not form a valid value of the target type.
	#[error("invalid data: {0}")]
	InvalidData(String),

	/// A top-level decode finished with bytes left over.
	#[error("{remaining} trailing bytes after decoded value")]
	TrailingBytes { remaining: usize },

	/// The sink could not be opened, written, or fully read.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	/// Schema text could not be parsed.
	#[error("schema error on line {line}: {message}")]
	Schema { line: usize, message: String },

	/// A schema refers to a struct it does not define.
	#[error("unknown struct `{0}`")]
	UnknownStruct(String),

	/// A parsed schema is not usable, e.g. it defines a name twice.
	#[error("invalid schema at `{path}`: {message}")]
	InvalidSchema { path: String, message: String },

	/// A dynamic value does not have the shape its schema describes.
	#[error("value does not match schema at `{path}`: {message}")]
	SchemaMismatch { path: String, message: String },
}

impl Error {
	pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
		Error::InvalidData(message.into())
	}

	pub(crate) fn schema(line: usize, message: impl Into<String>) -> Self {
		Error::Schema {
			line,
			message: message.into(),
		}
	}

	pub(crate) fn invalid_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
		Error::InvalidSchema {
			path: path.into(),
			message: message.into(),
		}
	}

	pub(crate) fn mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
		Error::SchemaMismatch {
			path: path.into(),
			message: message.into(),
		}
	}
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
