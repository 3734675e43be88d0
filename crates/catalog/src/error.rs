//! Error and warning types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::ids::{CategoryId, DietaryId, ItemId, TierId};

/// Reasons the catalog is unavailable.
///
/// Every variant leaves the menu features disabled; the rest of the page keeps
/// working. The type is `Clone` so a shared pending load can hand the same
/// failure to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
	/// The catalog file could not be read.
	#[error("I/O error reading {path}: {message}")]
	Io {
		/// Path of the document that failed to read.
		path: PathBuf,
		/// Rendered I/O error.
		message: String,
	},

	/// The document is not valid JSON or does not match the catalog shape.
	#[error("catalog parse error: {0}")]
	Parse(String),

	/// A custom source failed to produce the document.
	#[error("catalog source {source_name} failed: {message}")]
	Source {
		/// Description of the source.
		source_name: String,
		/// Failure reported by the source.
		message: String,
	},
}

impl From<serde_json::Error> for CatalogError {
	fn from(error: serde_json::Error) -> Self {
		Self::Parse(error.to_string())
	}
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Non-fatal problems found while normalizing a catalog document.
///
/// The offending entry is dropped and loading continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogWarning {
	/// An item references a dietary tag missing from `dietary_filters`.
	#[error("item {item} references unknown dietary tag '{tag}'")]
	UnknownDietaryTag {
		/// Item carrying the tag.
		item: ItemId,
		/// The unresolved tag.
		tag: DietaryId,
	},

	/// An item id was already used earlier in the document.
	#[error("duplicate item id {item} in category {category}")]
	DuplicateItem {
		/// The repeated id.
		item: ItemId,
		/// Category holding the dropped duplicate.
		category: CategoryId,
	},

	/// An item has neither an id nor a name.
	#[error("anonymous item in category {category}")]
	AnonymousItem {
		/// Category holding the dropped entry.
		category: CategoryId,
	},

	/// A category id was already used earlier in the document.
	#[error("duplicate category id {0}")]
	DuplicateCategory(CategoryId),

	/// A tier id was already used earlier in the document.
	#[error("duplicate tier id {0}")]
	DuplicateTier(TierId),

	/// A dietary filter id was already used earlier in the document.
	#[error("duplicate dietary filter id {0}")]
	DuplicateDietaryFilter(DietaryId),

	/// A tier's item count is not a non-negative whole number. The tier is
	/// kept with no quota.
	#[error("tier {tier} has invalid item count {value}")]
	InvalidQuota {
		/// The affected tier.
		tier: TierId,
		/// The rejected value, as written in the document.
		value: String,
	},
}
