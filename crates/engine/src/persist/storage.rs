//! Key-value slot backends.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::StorageError;

/// A string-valued key-value store, the shape of `window.localStorage`.
///
/// Accesses are synchronous and may fail at any time; callers treat every
/// failure as "storage unavailable" and carry on.
pub trait SlotStorage: Send + Sync {
	/// Returns `None` when the key has never been written.
	fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage.
///
/// Clones share the same slots, so two sessions built over clones of one
/// `MemoryStorage` see each other's writes like two tabs of one site.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	slots: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Raw slot contents, for inspection.
	pub fn get(&self, key: &str) -> Option<String> {
		self.slots.lock().get(key).cloned()
	}
}

impl SlotStorage for MemoryStorage {
	fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.slots.lock().get(key).cloned())
	}

	fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.slots.lock().insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// One JSON file per key under a directory.
///
/// Writes go through a temporary file that is synced and renamed over the
/// slot, so an interrupted write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
	dir: PathBuf,
}

impl FileStorage {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
	pub fn slot_path(&self, key: &str) -> PathBuf {
		let name: String = key
			.chars()
			.map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
			.collect();
		self.dir.join(format!("{name}.json"))
	}
}

fn io_error(path: &Path, error: io::Error) -> StorageError {
	StorageError::Io {
		path: path.to_path_buf(),
		error,
	}
}

fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}
	let tmp = path.with_extension("json.tmp");
	let mut file = File::create(&tmp)?;
	file.write_all(data)?;
	file.sync_all()?;
	fs::rename(&tmp, path)
}

impl SlotStorage for FileStorage {
	fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
		let path = self.slot_path(key);
		match fs::read_to_string(&path) {
			Ok(text) => Ok(Some(text)),
			Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(error) => Err(io_error(&path, error)),
		}
	}

	fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let path = self.slot_path(key);
		atomic_write(&path, value.as_bytes()).map_err(|error| io_error(&path, error))
	}
}

/// Storage that refuses every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl SlotStorage for DisabledStorage {
	fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
		Err(StorageError::Unavailable("storage is disabled".to_string()))
	}

	fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
		Err(StorageError::Unavailable("storage is disabled".to_string()))
	}
}
