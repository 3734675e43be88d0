use arabesque_catalog::{Catalog, ItemId, Tier};
use proptest::prelude::*;

use super::*;

const MENU: &str = r#"{
	"dietary_filters": [{ "id": "vegetarian", "label": "Végétarien" }],
	"formules": [
		{ "id": "standard", "nom": "Standard", "nombre_elements": 2 },
		{ "id": "duo", "nom": "Duo", "nombre_elements": 1 },
		{ "id": "sur-devis", "nom": "Sur devis", "contact_required": true, "nombre_elements": 1 }
	],
	"categories": [
		{ "id": "entrees", "nom": "Entrées", "elements": [
			{ "id": "e1", "nom": "Zaalouk", "dietary": ["vegetarian"] },
			{ "id": "e2", "nom": "Harira" }
		] },
		{ "id": "plats", "nom": "Plats", "elements": [
			{ "id": "p1", "nom": "Tajine" }
		] }
	]
}"#;

fn catalog() -> Catalog {
	Catalog::from_json(MENU).unwrap()
}

fn tier(catalog: &Catalog, id: &str) -> Tier {
	catalog.tier(id).unwrap().clone()
}

fn ids(store: &SelectionStore) -> Vec<&str> {
	store.selection().ids().map(ItemId::as_str).collect()
}

#[test]
fn toggle_without_tier_is_rejected() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	assert_eq!(
		store.toggle(&catalog, "e1", "entrees"),
		ToggleOutcome::Rejected(Rejection::NoActiveTier)
	);
	assert!(store.is_empty());
}

#[test]
fn quota_is_enforced() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	assert!(store.select_tier(&tier(&catalog, "standard")).is_change());

	assert_eq!(store.toggle(&catalog, "e1", "entrees"), ToggleOutcome::Added);
	assert_eq!(store.toggle(&catalog, "p1", "plats"), ToggleOutcome::Added);
	assert!(!store.can_add());
	assert_eq!(
		store.toggle(&catalog, "e2", "entrees"),
		ToggleOutcome::Rejected(Rejection::QuotaExceeded { max: 2 })
	);
	assert_eq!(ids(&store), ["e1", "p1"]);

	// Removal is allowed at the limit.
	assert_eq!(store.toggle(&catalog, "e1", "entrees"), ToggleOutcome::Removed { stale: false });
	assert!(store.can_add());
}

#[test]
fn item_must_resolve_under_category() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	store.select_tier(&tier(&catalog, "standard"));
	assert_eq!(
		store.toggle(&catalog, "p1", "entrees"),
		ToggleOutcome::Rejected(Rejection::UnknownItem { item: ItemId::new("p1") })
	);
	assert!(store.is_empty());
}

#[test]
fn unselected_stale_id_is_ignored() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	assert_eq!(store.toggle(&catalog, "ghost", "plats"), ToggleOutcome::Stale);

	store.select_tier(&tier(&catalog, "standard"));
	let outcome = store.toggle(&catalog, "ghost", "plats");
	assert_eq!(outcome, ToggleOutcome::Stale);
	assert!(!outcome.is_change());
	assert!(store.is_empty());
}

#[test]
fn tier_change_into_smaller_quota_conflicts() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	store.select_tier(&tier(&catalog, "standard"));
	store.toggle(&catalog, "e1", "entrees");
	store.toggle(&catalog, "p1", "plats");

	assert_eq!(
		store.select_tier(&tier(&catalog, "duo")),
		TierOutcome::Rejected(Rejection::QuotaConflict {
			tier: TierId::new("duo"),
			excess: 1
		})
	);
	assert_eq!(store.tier().map(|t| t.id.as_str()), Some("standard"));
	assert_eq!(store.len(), 2);

	store.clear();
	assert_eq!(
		store.select_tier(&tier(&catalog, "duo")),
		TierOutcome::Selected {
			previous: Some(TierId::new("standard"))
		}
	);
}

#[test]
fn contact_required_tier_is_unbounded() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	store.select_tier(&tier(&catalog, "sur-devis"));
	assert_eq!(store.quota(), Quota::Unbounded);
	for (item, category) in [("e1", "entrees"), ("e2", "entrees"), ("p1", "plats")] {
		assert_eq!(store.toggle(&catalog, item, category), ToggleOutcome::Added);
	}
	assert!(store.can_add());
}

#[test]
fn restored_stale_entries_are_removed_silently() {
	let catalog = catalog();
	let retired: SelectedItem = serde_json::from_value(serde_json::json!({
		"id": "retired",
		"nom": "Plat retiré",
		"category": "plats",
	}))
	.unwrap();
	let restored: Selection = [retired].into_iter().collect();
	let mut store = SelectionStore::with_selection(restored);

	// No tier is needed to take something out.
	assert_eq!(store.toggle(&catalog, "retired", "plats"), ToggleOutcome::Removed { stale: true });
	assert!(store.is_empty());
	assert_eq!(store.remove(&catalog, "retired"), RemoveOutcome::Absent);
}

#[test]
fn clear_reports_change() {
	let catalog = catalog();
	let mut store = SelectionStore::new();
	assert!(!store.clear());
	store.select_tier(&tier(&catalog, "standard"));
	store.toggle(&catalog, "e2", "entrees");
	assert!(store.clear());
	assert!(store.is_empty());
	assert!(store.tier().is_some());
}

#[derive(Debug, Clone)]
enum Op {
	Toggle(usize),
	Tier(usize),
	Clear,
}

const ITEMS: [(&str, &str); 4] = [("e1", "entrees"), ("e2", "entrees"), ("p1", "plats"), ("x9", "plats")];
const TIERS: [&str; 3] = ["standard", "duo", "sur-devis"];

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		6 => (0..ITEMS.len()).prop_map(Op::Toggle),
		2 => (0..TIERS.len()).prop_map(Op::Tier),
		1 => Just(Op::Clear),
	]
}

proptest! {
	#[test]
	fn quota_holds_over_any_sequence(ops in prop::collection::vec(op(), 0..40)) {
		let catalog = catalog();
		let mut store = SelectionStore::new();
		for op in ops {
			match op {
				Op::Toggle(i) => {
					let (item, category) = ITEMS[i];
					store.toggle(&catalog, item, category);
				}
				Op::Tier(i) => {
					store.select_tier(catalog.tier(TIERS[i]).unwrap());
				}
				Op::Clear => {
					store.clear();
				}
			}
			if let Some(max) = store.quota().max() {
				prop_assert!(store.len() <= max as usize);
			}
		}
	}

	#[test]
	fn double_toggle_restores_selection(prefix in prop::collection::vec(0..ITEMS.len(), 0..3), pick in 0..ITEMS.len()) {
		let catalog = catalog();
		let mut store = SelectionStore::new();
		store.select_tier(catalog.tier("sur-devis").unwrap());
		for i in prefix {
			let (item, category) = ITEMS[i];
			store.toggle(&catalog, item, category);
		}
		let before = store.selection().clone();
		let (item, category) = ITEMS[pick];
		if store.toggle(&catalog, item, category).is_change() {
			store.toggle(&catalog, item, category);
		}
		let mut after: Vec<_> = store.selection().ids().cloned().collect();
		let mut expected: Vec<_> = before.ids().cloned().collect();
		after.sort();
		expected.sort();
		prop_assert_eq!(after, expected);
	}
}
