//! Persistence of the selection in a single key-value slot.
//!
//! The slot holds one JSON object keyed by item id. Each value carries the
//! item's catalog fields under their provider names plus `"category"`. Both
//! pages of the site read and write the same slot, last write wins.
//!
//! Nothing in here fails loudly. A slot that cannot be read or parsed loads
//! as an empty selection; a write that fails is reported as
//! [`SaveOutcome::Ignored`] and the session keeps going in memory.

mod storage;
#[cfg(target_arch = "wasm32")]
mod web;

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

pub use self::storage::{DisabledStorage, FileStorage, MemoryStorage, SlotStorage};
#[cfg(target_arch = "wasm32")]
pub use self::web::LocalStorage;
use crate::error::StorageError;
use crate::selection::{SelectedItem, Selection};

/// Slot key shared by both pages.
pub const DEFAULT_STORAGE_KEY: &str = "arabesque_selection";

/// Result of [`PersistenceAdapter::save`].
#[derive(Debug)]
pub enum SaveOutcome {
	Saved,
	/// The write failed; the selection only lives in memory now.
	Ignored(StorageError),
}

impl SaveOutcome {
	pub fn is_saved(&self) -> bool {
		matches!(self, Self::Saved)
	}
}

/// Result of [`PersistenceAdapter::load`].
#[derive(Debug)]
pub enum LoadOutcome {
	Restored(Selection),
	/// Nothing usable was stored.
	Empty,
	/// The slot could not be read at all.
	Ignored(StorageError),
}

impl LoadOutcome {
	pub fn into_selection(self) -> Selection {
		match self {
			Self::Restored(selection) => selection,
			Self::Empty | Self::Ignored(_) => Selection::new(),
		}
	}
}

/// Reads and writes the selection through a [`SlotStorage`] backend.
pub struct PersistenceAdapter {
	storage: Box<dyn SlotStorage>,
	key: String,
}

impl fmt::Debug for PersistenceAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PersistenceAdapter")
			.field("key", &self.key)
			.finish_non_exhaustive()
	}
}

impl PersistenceAdapter {
	pub fn new(storage: impl SlotStorage + 'static, key: impl Into<String>) -> Self {
		Self {
			storage: Box::new(storage),
			key: key.into(),
		}
	}

	/// Adapter over `storage` using [`DEFAULT_STORAGE_KEY`].
	pub fn with_default_key(storage: impl SlotStorage + 'static) -> Self {
		Self::new(storage, DEFAULT_STORAGE_KEY)
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Overwrites the slot with the full selection.
	pub fn save(&self, selection: &Selection) -> SaveOutcome {
		let result = serde_json::to_string(selection)
			.map_err(StorageError::from)
			.and_then(|text| self.storage.write(&self.key, &text));
		match result {
			Ok(()) => {
				debug!(key = %self.key, count = selection.len(), "selection saved");
				SaveOutcome::Saved
			}
			Err(error) => {
				warn!(key = %self.key, %error, "failed to save selection");
				SaveOutcome::Ignored(error)
			}
		}
	}

	/// Reads the slot back.
	pub fn load(&self) -> LoadOutcome {
		let text = match self.storage.read(&self.key) {
			Ok(Some(text)) => text,
			Ok(None) => return LoadOutcome::Empty,
			Err(error) => {
				warn!(key = %self.key, %error, "failed to read selection");
				return LoadOutcome::Ignored(error);
			}
		};
		match decode_selection(&text) {
			Some(selection) if !selection.is_empty() => LoadOutcome::Restored(selection),
			_ => LoadOutcome::Empty,
		}
	}
}

/// Parses a persisted selection.
///
/// Returns `None` when the text is not a JSON object. Entries that are not
/// item snapshots are skipped; the map key is authoritative for the id.
pub fn decode_selection(text: &str) -> Option<Selection> {
	let value: Value = match serde_json::from_str(text) {
		Ok(value) => value,
		Err(error) => {
			warn!(%error, "discarding unreadable persisted selection");
			return None;
		}
	};
	let Value::Object(entries) = value else {
		warn!("discarding persisted selection: not an object");
		return None;
	};

	let mut selection = Selection::new();
	for (key, mut entry) in entries {
		if let Value::Object(fields) = &mut entry {
			fields.insert("id".to_string(), Value::String(key.clone()));
		}
		match serde_json::from_value::<SelectedItem>(entry) {
			Ok(item) => selection.insert(item),
			Err(error) => warn!(item = %key, %error, "skipping malformed persisted entry"),
		}
	}
	Some(selection)
}
