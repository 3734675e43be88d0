//! Outbound quote request payload.

use std::fmt::Write as _;

use arabesque_catalog::{Catalog, CategoryId, DietaryFilter, ItemId};
use serde::Serialize;

use crate::filter::{CategoryFilter, FilterState};
use crate::store::SelectionStore;
use crate::view::TierSummary;

/// One selected item in a quote request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
	/// 1-based position in selection order.
	pub position: usize,
	pub item_id: ItemId,
	pub name: String,
	pub description: String,
	pub category_id: CategoryId,
	pub category_name: String,
}

/// Everything the caterer needs to price a menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRequest {
	pub tier: Option<TierSummary>,
	pub lines: Vec<QuoteLine>,
	pub count: usize,
	pub category_filter: CategoryFilter,
	pub dietary: Vec<DietaryFilter>,
}

impl QuoteRequest {
	pub fn build(catalog: &Catalog, store: &SelectionStore, filters: &FilterState) -> Self {
		let lines: Vec<_> = store
			.selection()
			.iter()
			.enumerate()
			.map(|(index, item)| QuoteLine {
				position: index + 1,
				item_id: item.id.clone(),
				name: item.name.clone(),
				description: item.description.clone(),
				category_id: item.category.clone(),
				category_name: catalog
					.category(item.category.as_str())
					.map_or_else(|| item.category.to_string(), |c| c.name.clone()),
			})
			.collect();
		Self {
			tier: store.tier().map(TierSummary::from),
			count: lines.len(),
			lines,
			category_filter: filters.category().clone(),
			dietary: filters
				.dietary()
				.iter()
				.filter_map(|tag| catalog.dietary_filter(tag.as_str()).cloned())
				.collect(),
		}
	}

	/// Plain-text listing for an email body: the tier name followed by one
	/// numbered `name - description` line per item.
	pub fn plain_text(&self) -> String {
		let mut out = String::new();
		if let Some(tier) = &self.tier {
			let _ = writeln!(out, "{}", tier.name);
			let _ = writeln!(out);
		}
		for line in &self.lines {
			if line.description.is_empty() {
				let _ = writeln!(out, "{}. {}", line.position, line.name);
			} else {
				let _ = writeln!(out, "{}. {} - {}", line.position, line.name, line.description);
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::selection::{SelectedItem, Selection};

	const MENU: &str = include_str!("../../catalog/tests/fixtures/menu.json");

	#[test]
	fn lines_follow_selection_order() {
		let catalog = Catalog::from_json(MENU).unwrap();
		let mut store = SelectionStore::new();
		store.select_tier(catalog.tier("standard").unwrap());
		store.toggle(&catalog, "pastilla", "plats");
		store.toggle(&catalog, "zaalouk", "entrees");
		let mut filters = FilterState::default();
		filters.set_tag("halal".into(), true);
		filters.set_tag("unknown".into(), true);

		let quote = QuoteRequest::build(&catalog, &store, &filters);
		assert_eq!(quote.count, 2);
		assert_eq!(quote.lines[0].position, 1);
		assert_eq!(quote.lines[0].item_id.as_str(), "pastilla");
		assert_eq!(quote.lines[1].category_name, "Entrées");
		assert_eq!(quote.tier.as_ref().unwrap().name, catalog.tier("standard").unwrap().name);
		assert_eq!(quote.dietary.len(), 1);

		let json = serde_json::to_value(&quote).unwrap();
		assert_eq!(json["category_filter"], json!("all"));
		assert_eq!(json["lines"][1]["item_id"], json!("zaalouk"));
	}

	#[test]
	fn stale_category_falls_back_to_id() {
		let catalog = Catalog::from_json(MENU).unwrap();
		let stale: SelectedItem =
			serde_json::from_value(json!({ "id": "mechoui", "nom": "Méchoui", "category": "grillades" })).unwrap();
		let store = SelectionStore::with_selection(Selection::from_iter([stale]));

		let quote = QuoteRequest::build(&catalog, &store, &FilterState::default());
		assert!(quote.tier.is_none());
		assert_eq!(quote.lines[0].category_name, "grillades");
		assert_eq!(quote.plain_text(), "1. Méchoui\n");
	}
}
