//! The loaded, read-only catalog.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::document::RawDocument;
use crate::error::{CatalogWarning, Result};
use crate::ids::{CategoryId, DietaryId, ItemId, TierId};
use crate::model::{Category, CatalogItem, DietaryFilter, Tier, TierKind};
use crate::normalize::normalize;

/// Default number of results returned by [`Catalog::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
/// Queries shorter than this (in chars) return no results.
pub const DEFAULT_SEARCH_MIN_QUERY: usize = 2;

/// Immutable menu content: categories, items, tiers and dietary filters.
///
/// Item ids are unique across the whole catalog; lookups by id are O(1).
/// The source document is kept verbatim so it can be written back unchanged.
#[derive(Debug, Clone)]
pub struct Catalog {
	categories: Vec<Category>,
	tiers: Vec<Tier>,
	dietary: Vec<DietaryFilter>,
	/// Item id to `(category index, item index)`.
	item_index: FxHashMap<ItemId, (usize, usize)>,
	category_index: FxHashMap<CategoryId, usize>,
	tier_index: FxHashMap<TierId, usize>,
	warnings: Vec<CatalogWarning>,
	document: Value,
}

/// Tuning for [`Catalog::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
	pub min_query: usize,
	pub limit: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			min_query: DEFAULT_SEARCH_MIN_QUERY,
			limit: DEFAULT_SEARCH_LIMIT,
		}
	}
}

/// One search result.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
	pub item: &'a CatalogItem,
	pub category: &'a Category,
}

impl Catalog {
	/// Parses a JSON catalog document.
	pub fn from_json(input: &str) -> Result<Self> {
		let document: Value = serde_json::from_str(input)?;
		Self::from_value(document)
	}

	/// Builds a catalog from an already parsed JSON document.
	pub fn from_value(document: Value) -> Result<Self> {
		let raw = RawDocument::deserialize(&document)?;
		let normalized = normalize(raw);

		let mut item_index = FxHashMap::default();
		let mut category_index = FxHashMap::default();
		for (ci, category) in normalized.categories.iter().enumerate() {
			category_index.insert(category.id.clone(), ci);
			for (ii, item) in category.items.iter().enumerate() {
				item_index.insert(item.id.clone(), (ci, ii));
			}
		}
		let tier_index = normalized.tiers.iter().enumerate().map(|(i, t)| (t.id.clone(), i)).collect();

		Ok(Self {
			categories: normalized.categories,
			tiers: normalized.tiers,
			dietary: normalized.dietary,
			item_index,
			category_index,
			tier_index,
			warnings: normalized.warnings,
			document,
		})
	}

	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	pub fn category(&self, id: &str) -> Option<&Category> {
		self.category_index.get(id).map(|&i| &self.categories[i])
	}

	/// All items in catalog order (category order, then item order).
	pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
		self.categories.iter().flat_map(|c| c.items.iter())
	}

	pub fn item(&self, id: &str) -> Option<&CatalogItem> {
		self.item_index.get(id).map(|&(ci, ii)| &self.categories[ci].items[ii])
	}

	/// Looks up an item, requiring it to belong to `category`.
	pub fn item_in(&self, id: &str, category: &str) -> Option<&CatalogItem> {
		self.item(id).filter(|item| item.category.as_str() == category)
	}

	pub fn contains_item(&self, id: &str) -> bool {
		self.item_index.contains_key(id)
	}

	/// Every tier, formulas first, in document order.
	pub fn tiers(&self) -> &[Tier] {
		&self.tiers
	}

	pub fn tier(&self, id: &str) -> Option<&Tier> {
		self.tier_index.get(id).map(|&i| &self.tiers[i])
	}

	pub fn tiers_of(&self, kind: TierKind) -> impl Iterator<Item = &Tier> {
		self.tiers.iter().filter(move |t| t.kind == kind)
	}

	pub fn dietary_filters(&self) -> &[DietaryFilter] {
		&self.dietary
	}

	pub fn dietary_filter(&self, id: &str) -> Option<&DietaryFilter> {
		self.dietary.iter().find(|f| f.id.as_str() == id)
	}

	pub fn is_known_tag(&self, id: &DietaryId) -> bool {
		self.dietary.iter().any(|f| &f.id == id)
	}

	/// Problems found while normalizing the document.
	pub fn warnings(&self) -> &[CatalogWarning] {
		&self.warnings
	}

	/// The source document exactly as parsed.
	pub fn document(&self) -> &Value {
		&self.document
	}

	/// Case-insensitive substring search over item names and descriptions.
	///
	/// Results follow catalog order and are capped at `options.limit`.
	pub fn search(&self, query: &str, options: SearchOptions) -> Vec<SearchHit<'_>> {
		let query = query.trim();
		if query.chars().count() < options.min_query {
			return Vec::new();
		}
		let needle = query.to_lowercase();
		self.categories
			.iter()
			.flat_map(|category| category.items.iter().map(move |item| SearchHit { item, category }))
			.filter(|hit| {
				hit.item.name.to_lowercase().contains(&needle) || hit.item.description.to_lowercase().contains(&needle)
			})
			.take(options.limit)
			.collect()
	}
}
