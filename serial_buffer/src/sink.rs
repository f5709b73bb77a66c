//! External byte stores which encoded buffers are saved to and loaded from.
//!
//! A [`Sink`] stores whole byte blobs under a key. The encoded bytes are the
//! entire content of the entry: sinks add no header or footer of their own.

use std::{
	collections::HashMap,
	fs, io,
	path::{Path, PathBuf},
};

use tracing::debug;

/// Byte store which buffers are persisted to.
///
/// Bytes saved under a key, then loaded with the same key, must come back
/// identical. A save either stores all bytes or returns an error.
pub trait Sink {
	/// Store `bytes` under `key`, replacing anything already there.
	fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;

	/// Get all bytes stored under `key`.
	fn load(&mut self, key: &str) -> io::Result<Vec<u8>>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
	#[inline]
	fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
		(**self).save(key, bytes)
	}

	#[inline]
	fn load(&mut self, key: &str) -> io::Result<Vec<u8>> {
		(**self).load(key)
	}
}

/// Sink backed by files on disk.
///
/// Keys are file paths, relative to the root directory (or absolute).
///
/// Saves write to a temporary file next to the target, then rename it into
/// place, so an interrupted save never leaves a partially-written file under
/// the key.
#[derive(Clone, Debug)]
pub struct FileSink {
	root: PathBuf,
}

impl FileSink {
	/// Create sink with keys resolved relative to `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		FileSink { root: root.into() }
	}

	/// Create sink with keys resolved relative to the current directory.
	pub fn current_dir() -> Self {
		FileSink::new(".")
	}

	/// Get path a key is stored at.
	pub fn path_for(&self, key: &str) -> PathBuf {
		self.root.join(key)
	}
}

impl Sink for FileSink {
	fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
		let path = self.path_for(key);
		write_atomic(&path, bytes)?;
		debug!(path = %path.display(), len = bytes.len(), "saved bytes to file");
		Ok(())
	}

	fn load(&mut self, key: &str) -> io::Result<Vec<u8>> {
		let path = self.path_for(key);
		let bytes = fs::read(&path)?;
		debug!(path = %path.display(), len = bytes.len(), "loaded bytes from file");
		Ok(bytes)
	}
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
	let mut tmp_name = path.file_name().map(|name| name.to_os_string()).ok_or_else(|| {
		io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("`{}` is not a file path", path.display()),
		)
	})?;
	tmp_name.push(".tmp");
	let tmp_path = path.with_file_name(tmp_name);

	let result = fs::File::create(&tmp_path).and_then(|mut file| {
		io::Write::write_all(&mut file, bytes)?;
		file.sync_all()
	});
	let result = result.and_then(|_| fs::rename(&tmp_path, path));

	if result.is_err() {
		// Cleanup failure is ignored, `result` holds the error to report
		let _ = fs::remove_file(&tmp_path);
	}
	result
}

/// Sink which keeps blobs in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
	blobs: HashMap<String, Vec<u8>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Get bytes stored under `key`, without copying.
	pub fn get(&self, key: &str) -> Option<&[u8]> {
		self.blobs.get(key).map(Vec::as_slice)
	}

	pub fn len(&self) -> usize {
		self.blobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blobs.is_empty()
	}
}

impl Sink for MemorySink {
	fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
		self.blobs.insert(key.to_string(), bytes.to_vec());
		debug!(key, len = bytes.len(), "saved bytes to memory");
		Ok(())
	}

	fn load(&mut self, key: &str) -> io::Result<Vec<u8>> {
		self.blobs.get(key).cloned().ok_or_else(|| {
			io::Error::new(io::ErrorKind::NotFound, format!("no blob stored under `{key}`"))
		})
	}
}
