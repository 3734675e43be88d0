//! String identifier newtypes for catalog entities.
//!
//! Ids are the canonical keys used everywhere downstream of the loader; they
//! are never derived from display text once the catalog is built.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_string())
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
	};
}

string_id!(
	/// Identifier of a menu item. Globally unique within a loaded catalog.
	ItemId
);
string_id!(
	/// Identifier of a menu category.
	CategoryId
);
string_id!(
	/// Identifier of a pricing tier (formula or budget).
	TierId
);
string_id!(
	/// Identifier of a dietary filter tag.
	DietaryId
);

/// Lowercases `text` and joins its alphanumeric runs with `-`.
///
/// Used to mint ids for catalog entries that only carry a display name.
pub fn slugify(text: &str) -> String {
	let mut slug = String::with_capacity(text.len());
	let mut pending_dash = false;
	for ch in text.chars() {
		if ch.is_alphanumeric() {
			if pending_dash && !slug.is_empty() {
				slug.push('-');
			}
			pending_dash = false;
			slug.extend(ch.to_lowercase());
		} else {
			pending_dash = true;
		}
	}
	slug
}

#[cfg(test)]
mod tests {
	use rustc_hash::FxHashMap;

	use super::*;

	#[test]
	fn slugify_collapses_separators() {
		assert_eq!(slugify("Pastilla au poulet"), "pastilla-au-poulet");
		assert_eq!(slugify("  Thé -- à la menthe! "), "thé-à-la-menthe");
		assert_eq!(slugify("***"), "");
	}

	#[test]
	fn ids_lookup_by_str() {
		let mut map = FxHashMap::default();
		map.insert(ItemId::new("e1"), 1);
		assert_eq!(map.get("e1"), Some(&1));
	}

	#[test]
	fn ids_serialize_transparently() {
		let json = serde_json::to_string(&TierId::new("standard")).unwrap();
		assert_eq!(json, "\"standard\"");
	}
}
