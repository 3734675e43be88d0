//! Visible-item derivation from category and dietary filters.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use arabesque_catalog::{Catalog, CatalogItem, CategoryId, DietaryId};
use serde::{Deserialize, Serialize};

/// Token the UI uses for "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Active dietary constraints. Ordered so echoes are deterministic.
pub type DietarySet = BTreeSet<DietaryId>;

/// Category restriction of the visible set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
	#[default]
	All,
	Only(CategoryId),
}

impl CategoryFilter {
	pub fn admits(&self, category: &CategoryId) -> bool {
		match self {
			Self::All => true,
			Self::Only(only) => only == category,
		}
	}
}

impl From<&str> for CategoryFilter {
	fn from(token: &str) -> Self {
		if token == ALL_CATEGORIES {
			Self::All
		} else {
			Self::Only(CategoryId::new(token))
		}
	}
}

impl From<String> for CategoryFilter {
	fn from(token: String) -> Self {
		if token == ALL_CATEGORIES {
			Self::All
		} else {
			Self::Only(CategoryId::new(token))
		}
	}
}

impl From<CategoryFilter> for String {
	fn from(filter: CategoryFilter) -> Self {
		filter.to_string()
	}
}

impl FromStr for CategoryFilter {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

impl fmt::Display for CategoryFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str(ALL_CATEGORIES),
			Self::Only(id) => f.write_str(id.as_str()),
		}
	}
}

/// Items passing both filters, in catalog order.
///
/// Dietary tags combine with AND semantics; an empty set imposes no
/// constraint. An unknown category yields an empty result.
pub fn visible_items<'a>(catalog: &'a Catalog, category: &CategoryFilter, dietary: &DietarySet) -> Vec<&'a CatalogItem> {
	catalog
		.categories()
		.iter()
		.filter(|c| category.admits(&c.id))
		.flat_map(|c| c.items.iter())
		.filter(|item| item.has_all_tags(dietary))
		.collect()
}

/// The session's filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
	category: CategoryFilter,
	dietary: DietarySet,
}

impl FilterState {
	pub fn category(&self) -> &CategoryFilter {
		&self.category
	}

	pub fn dietary(&self) -> &DietarySet {
		&self.dietary
	}

	/// Returns true if the filter changed.
	pub fn set_category(&mut self, category: CategoryFilter) -> bool {
		if self.category == category {
			return false;
		}
		self.category = category;
		true
	}

	/// Turns one tag on or off. Returns true if the set changed.
	pub fn set_tag(&mut self, tag: DietaryId, active: bool) -> bool {
		if active { self.dietary.insert(tag) } else { self.dietary.remove(&tag) }
	}

	/// Replaces the whole tag set. Returns true if it changed.
	pub fn set_tags(&mut self, tags: DietarySet) -> bool {
		if self.dietary == tags {
			return false;
		}
		self.dietary = tags;
		true
	}

	pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogItem> {
		visible_items(catalog, &self.category, &self.dietary)
	}
}
