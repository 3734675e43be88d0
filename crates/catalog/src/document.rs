//! Raw catalog document shapes as published by the data provider.
//!
//! Two layouts exist in the wild. The builder page reads `formules` and
//! categories whose `elements` are full item objects (French field names);
//! the configurator page reads `budgets` and categories whose `items` are
//! plain strings. Both deserialize into these types; [`crate::normalize`]
//! folds them into the canonical model. Fields the model does not know are
//! kept in `extra` maps so they survive into selection snapshots.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Top-level catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDocument {
	#[serde(deserialize_with = "nullable")]
	pub categories: Vec<RawCategory>,
	#[serde(deserialize_with = "nullable")]
	pub formules: Vec<RawFormula>,
	#[serde(deserialize_with = "nullable")]
	pub budgets: Vec<RawBudget>,
	#[serde(deserialize_with = "nullable")]
	pub dietary_filters: Vec<RawDietaryFilter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
	pub id: Option<String>,
	#[serde(alias = "name")]
	pub nom: Option<String>,
	pub icon: Option<String>,
	#[serde(deserialize_with = "nullable")]
	pub elements: Vec<RawItem>,
	#[serde(deserialize_with = "nullable")]
	pub items: Vec<RawEntry>,
}

/// Entry of a configurator-style `items` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
	Name(String),
	Item(RawItem),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
	pub id: Option<String>,
	#[serde(alias = "name")]
	pub nom: Option<String>,
	pub description: Option<String>,
	pub image: Option<String>,
	#[serde(deserialize_with = "nullable")]
	pub dietary: Vec<String>,
	#[serde(deserialize_with = "nullable")]
	pub chef_special: bool,
	#[serde(deserialize_with = "nullable")]
	pub premium: bool,
	#[serde(alias = "signature", deserialize_with = "nullable")]
	pub signature_drink: bool,
	pub price_indicator: Option<Value>,
	pub temps_preparation: Option<String>,
	#[serde(deserialize_with = "nullable")]
	pub allergenes: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Builder-page tier definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFormula {
	pub id: Option<String>,
	#[serde(alias = "name")]
	pub nom: Option<String>,
	pub description: Option<String>,
	pub prix: Option<Value>,
	pub badge: Option<String>,
	#[serde(deserialize_with = "nullable")]
	pub recommended: bool,
	#[serde(deserialize_with = "nullable")]
	pub avantages: Vec<String>,
	#[serde(deserialize_with = "nullable")]
	pub contact_required: bool,
	pub nombre_elements: Option<Value>,
}

/// Configurator-page tier definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBudget {
	pub id: Option<String>,
	pub name: Option<String>,
	pub price: Option<Value>,
	pub choices: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDietaryFilter {
	pub id: String,
	pub label: Option<String>,
	pub icon: Option<String>,
}

/// Reads a number or a numeric string (`"45"`, `"45.5"`) as `f64`.
pub fn value_as_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().trim_end_matches(['$', '€']).trim().parse().ok(),
		_ => None,
	}
}

/// Reads a quota count: a non-negative whole number, or a string holding one
/// (`"6"`).
pub fn value_as_count(value: &Value) -> Option<u32> {
	match value {
		Value::Number(n) => match n.as_u64() {
			Some(count) => u32::try_from(count).ok(),
			None => n
				.as_f64()
				.filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
				.map(|f| f as u32),
		},
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn builder_item_keeps_unknown_fields() {
		let item: RawItem = serde_json::from_value(json!({
			"id": "e1",
			"nom": "Zaalouk",
			"dietary": ["vegetarian"],
			"saison": "été",
		}))
		.unwrap();
		assert_eq!(item.nom.as_deref(), Some("Zaalouk"));
		assert_eq!(item.extra.get("saison"), Some(&json!("été")));
		assert!(!item.extra.contains_key("nom"));
	}

	#[test]
	fn nulls_read_as_defaults() {
		let doc: RawDocument = serde_json::from_value(json!({
			"categories": null,
			"formules": [{ "id": "f", "avantages": null, "recommended": null }],
		}))
		.unwrap();
		assert!(doc.categories.is_empty());
		assert!(doc.formules[0].avantages.is_empty());
		assert!(!doc.formules[0].recommended);
	}

	#[test]
	fn configurator_items_accept_strings() {
		let category: RawCategory = serde_json::from_value(json!({
			"name": "Entrées",
			"items": ["Briouates", { "id": "harira", "name": "Harira" }],
		}))
		.unwrap();
		assert_eq!(category.nom.as_deref(), Some("Entrées"));
		assert!(matches!(&category.items[0], RawEntry::Name(name) if name == "Briouates"));
		assert!(matches!(&category.items[1], RawEntry::Item(item) if item.id.as_deref() == Some("harira")));
	}

	#[test]
	fn prices_accept_numeric_strings() {
		assert_eq!(value_as_f64(&json!(45)), Some(45.0));
		assert_eq!(value_as_f64(&json!("39.5$")), Some(39.5));
		assert_eq!(value_as_f64(&json!("sur devis")), None);
	}
}
