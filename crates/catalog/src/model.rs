//! Canonical, immutable catalog entities.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{CategoryId, DietaryId, ItemId, TierId};

bitflags! {
	/// Presentation badges attached to a menu item.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ItemFlags: u8 {
		const CHEF_SPECIAL = 1 << 0;
		const PREMIUM = 1 << 1;
		const SIGNATURE = 1 << 2;
	}
}

/// Ordinal price level of an item (not a currency amount).
///
/// The provider writes it either as a number or as a run of currency symbols
/// (`"$$"`); the original value is kept for display and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct PriceIndicator {
	level: u8,
	raw: Value,
}

impl PriceIndicator {
	/// Ordinal level; `0` when the raw value is not recognized.
	pub fn level(&self) -> u8 {
		self.level
	}

	/// The value as written in the document.
	pub fn raw(&self) -> &Value {
		&self.raw
	}
}

impl From<Value> for PriceIndicator {
	fn from(raw: Value) -> Self {
		let level = match &raw {
			Value::Number(n) => n.as_u64().map_or(0, |n| n.min(u64::from(u8::MAX)) as u8),
			Value::String(s) => {
				let s = s.trim();
				if let Ok(n) = s.parse::<u8>() {
					n
				} else {
					let mut chars = s.chars();
					match chars.next() {
						Some(first) if !first.is_alphanumeric() && chars.all(|c| c == first) => {
							s.chars().count().min(usize::from(u8::MAX)) as u8
						}
						_ => 0,
					}
				}
			}
			_ => 0,
		};
		Self { level, raw }
	}
}

impl From<PriceIndicator> for Value {
	fn from(indicator: PriceIndicator) -> Self {
		indicator.raw
	}
}

/// A selectable menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
	pub id: ItemId,
	pub name: String,
	pub description: String,
	pub category: CategoryId,
	pub price_indicator: Option<PriceIndicator>,
	/// Dietary tags, all resolved against the catalog's dietary filters.
	pub dietary: Vec<DietaryId>,
	pub flags: ItemFlags,
	pub image: Option<String>,
	pub preparation_time: Option<String>,
	pub allergens: Vec<String>,
	/// Provider fields the model does not interpret.
	pub extra: Map<String, Value>,
}

impl CatalogItem {
	/// Returns true if the item carries every tag in `tags`.
	pub fn has_all_tags<'a>(&self, tags: impl IntoIterator<Item = &'a DietaryId>) -> bool {
		tags.into_iter().all(|tag| self.dietary.contains(tag))
	}
}

/// An ordered group of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
	pub id: CategoryId,
	pub name: String,
	pub icon: Option<String>,
	pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFilter {
	pub id: DietaryId,
	pub label: String,
	pub icon: Option<String>,
}

/// Which provider shape a tier was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
	Formula,
	Budget,
}

/// Maximum number of items a tier admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Option<u32>", from = "Option<u32>")]
pub enum Quota {
	/// No upper bound ("on quote" formulas).
	#[default]
	Unbounded,
	Limited(u32),
}

impl Quota {
	/// The finite bound, if any.
	pub fn max(self) -> Option<u32> {
		match self {
			Self::Unbounded => None,
			Self::Limited(max) => Some(max),
		}
	}

	/// Whether one more item fits next to `count` selected ones.
	pub fn admits_one_more(self, count: usize) -> bool {
		match self {
			Self::Unbounded => true,
			Self::Limited(max) => count < max as usize,
		}
	}

	/// Items left before the bound is reached; `None` when unbounded.
	pub fn remaining(self, count: usize) -> Option<u32> {
		self.max().map(|max| (max as usize).saturating_sub(count) as u32)
	}

	/// How many items a selection of `count` holds beyond the bound.
	pub fn excess(self, count: usize) -> usize {
		match self {
			Self::Unbounded => 0,
			Self::Limited(max) => count.saturating_sub(max as usize),
		}
	}
}

impl From<Option<u32>> for Quota {
	/// A zero count means "no limit", as the site has always displayed it.
	fn from(max: Option<u32>) -> Self {
		match max {
			None | Some(0) => Self::Unbounded,
			Some(max) => Self::Limited(max),
		}
	}
}

impl From<Quota> for Option<u32> {
	fn from(quota: Quota) -> Self {
		quota.max()
	}
}

/// A pricing package: a named formula or a plain budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
	pub id: TierId,
	pub name: String,
	pub kind: TierKind,
	pub description: Option<String>,
	pub price: Option<f64>,
	pub quota: Quota,
	pub recommended: bool,
	/// The tier is sold through a manual quote instead of self-service.
	pub contact_required: bool,
	pub badge: Option<String>,
	pub perks: Vec<String>,
}

impl Tier {
	pub fn max_items(&self) -> Option<u32> {
		self.quota.max()
	}
}
