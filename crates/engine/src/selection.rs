//! The selection: chosen items keyed by id, in insertion order.

use arabesque_catalog::{CatalogItem, CategoryId, DietaryId, ItemFlags, ItemId, PriceIndicator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display data of a chosen item, frozen at the moment it was added.
///
/// Serializes with the provider's field names plus `category`, which is the
/// entry format of the persisted selection slot shared by both pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedItem {
	pub id: ItemId,
	#[serde(rename = "nom", alias = "name", default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub description: String,
	/// Category the item was picked from.
	pub category: CategoryId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price_indicator: Option<PriceIndicator>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub dietary: Vec<DietaryId>,
	#[serde(default, skip_serializing_if = "is_false")]
	pub chef_special: bool,
	#[serde(default, skip_serializing_if = "is_false")]
	pub premium: bool,
	#[serde(default, skip_serializing_if = "is_false")]
	pub signature_drink: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(rename = "temps_preparation", default, skip_serializing_if = "Option::is_none")]
	pub preparation_time: Option<String>,
	#[serde(rename = "allergenes", default, skip_serializing_if = "Vec::is_empty")]
	pub allergens: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
	!*value
}

impl From<&CatalogItem> for SelectedItem {
	fn from(item: &CatalogItem) -> Self {
		Self {
			id: item.id.clone(),
			name: item.name.clone(),
			description: item.description.clone(),
			category: item.category.clone(),
			price_indicator: item.price_indicator.clone(),
			dietary: item.dietary.clone(),
			chef_special: item.flags.contains(ItemFlags::CHEF_SPECIAL),
			premium: item.flags.contains(ItemFlags::PREMIUM),
			signature_drink: item.flags.contains(ItemFlags::SIGNATURE),
			image: item.image.clone(),
			preparation_time: item.preparation_time.clone(),
			allergens: item.allergens.clone(),
			extra: item.extra.clone(),
		}
	}
}

/// Set of chosen items, keyed by item id.
///
/// Keys are unique; iteration follows insertion order so summaries and quote
/// lines stay stable. Serializes as a JSON object keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Selection {
	items: IndexMap<ItemId, SelectedItem>,
}

impl Selection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.items.contains_key(id)
	}

	pub fn get(&self, id: &str) -> Option<&SelectedItem> {
		self.items.get(id)
	}

	/// Items in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &SelectedItem> {
		self.items.values()
	}

	pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
		self.items.keys()
	}

	/// Inserts or replaces an entry, keeping the original position on replace.
	pub(crate) fn insert(&mut self, item: SelectedItem) {
		self.items.insert(item.id.clone(), item);
	}

	/// Removes an entry while preserving the order of the rest.
	pub(crate) fn remove(&mut self, id: &str) -> Option<SelectedItem> {
		self.items.shift_remove(id)
	}

	pub(crate) fn clear(&mut self) {
		self.items.clear();
	}
}

impl FromIterator<SelectedItem> for Selection {
	fn from_iter<I: IntoIterator<Item = SelectedItem>>(iter: I) -> Self {
		let mut selection = Self::new();
		for item in iter {
			selection.insert(item);
		}
		selection
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn item(id: &str, category: &str) -> SelectedItem {
		SelectedItem {
			id: ItemId::new(id),
			name: id.to_uppercase(),
			description: String::new(),
			category: CategoryId::new(category),
			price_indicator: None,
			dietary: Vec::new(),
			chef_special: false,
			premium: false,
			signature_drink: false,
			image: None,
			preparation_time: None,
			allergens: Vec::new(),
			extra: Map::new(),
		}
	}

	#[test]
	fn keys_are_unique() {
		let selection: Selection = [item("e1", "entrees"), item("e1", "entrees")].into_iter().collect();
		assert_eq!(selection.len(), 1);
	}

	#[test]
	fn removal_preserves_order() {
		let mut selection: Selection =
			[item("a", "x"), item("b", "x"), item("c", "x")].into_iter().collect();
		selection.remove("b");
		let ids: Vec<&str> = selection.ids().map(ItemId::as_str).collect();
		assert_eq!(ids, ["a", "c"]);
	}

	#[test]
	fn serializes_with_provider_field_names() {
		let mut entry = item("p1", "plats");
		entry.chef_special = true;
		entry.preparation_time = Some("2h".to_string());
		entry.extra.insert("saison".to_string(), json!("hiver"));
		let selection: Selection = [entry].into_iter().collect();
		assert_eq!(
			serde_json::to_value(&selection).unwrap(),
			json!({
				"p1": {
					"id": "p1",
					"nom": "P1",
					"category": "plats",
					"chef_special": true,
					"temps_preparation": "2h",
					"saison": "hiver",
				}
			})
		);
	}
}
