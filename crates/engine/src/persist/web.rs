//! `window.localStorage` backend for browser builds.

use web_sys::{Storage, window};

use super::SlotStorage;
use crate::error::StorageError;

/// Slots kept in the page's `localStorage`, shared by every page of the site.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<Storage, StorageError> {
	let window = window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
	window
		.local_storage()
		.map_err(|_| StorageError::Unavailable("localStorage access denied".to_string()))?
		.ok_or_else(|| StorageError::Unavailable("no localStorage".to_string()))
}

impl SlotStorage for LocalStorage {
	fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
		local_storage()?
			.get_item(key)
			.map_err(|_| StorageError::Unavailable("failed to get localStorage item".to_string()))
	}

	fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
		// Quota errors land here too.
		local_storage()?
			.set_item(key, value)
			.map_err(|_| StorageError::Unavailable("failed to set localStorage item".to_string()))
	}
}
