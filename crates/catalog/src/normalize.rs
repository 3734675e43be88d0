//! Folds a [`RawDocument`] into the canonical model.
//!
//! Both tier shapes collapse into [`Tier`] here so nothing downstream branches
//! on the provider layout. Entries that cannot be used are dropped and
//! reported as [`CatalogWarning`]s.

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::warn;

use crate::document::{
	RawBudget, RawCategory, RawDietaryFilter, RawDocument, RawEntry, RawFormula, RawItem, value_as_count, value_as_f64,
};
use crate::error::CatalogWarning;
use crate::ids::{CategoryId, DietaryId, ItemId, TierId, slugify};
use crate::model::{Category, CatalogItem, DietaryFilter, ItemFlags, PriceIndicator, Quota, Tier, TierKind};

pub(crate) struct Normalized {
	pub categories: Vec<Category>,
	pub tiers: Vec<Tier>,
	pub dietary: Vec<DietaryFilter>,
	pub warnings: Vec<CatalogWarning>,
}

pub(crate) fn normalize(raw: RawDocument) -> Normalized {
	let mut warnings = Vec::new();

	let dietary = normalize_dietary(raw.dietary_filters, &mut warnings);
	let known_tags: FxHashSet<&str> = dietary.iter().map(|f| f.id.as_str()).collect();

	let mut seen_categories = FxHashSet::default();
	let mut seen_items = FxHashSet::default();
	let mut categories = Vec::with_capacity(raw.categories.len());
	for (index, raw_category) in raw.categories.into_iter().enumerate() {
		let name = raw_category.nom.clone().unwrap_or_default();
		let id = category_id(raw_category.id.as_deref(), &name, index);
		// A dropped category must not claim its item ids.
		if !seen_categories.insert(id.clone()) {
			warnings.push(CatalogWarning::DuplicateCategory(id));
			continue;
		}
		categories.push(normalize_category(raw_category, id, name, &known_tags, &mut seen_items, &mut warnings));
	}

	let mut tiers: Vec<Tier> = Vec::with_capacity(raw.formules.len() + raw.budgets.len());
	for (index, formula) in raw.formules.into_iter().enumerate() {
		tiers.push(formula_tier(formula, index, &mut warnings));
	}
	for (index, budget) in raw.budgets.into_iter().enumerate() {
		tiers.push(budget_tier(budget, index, &mut warnings));
	}
	let mut seen_tiers = FxHashSet::default();
	tiers.retain(|tier| {
		if seen_tiers.insert(tier.id.clone()) {
			true
		} else {
			warnings.push(CatalogWarning::DuplicateTier(tier.id.clone()));
			false
		}
	});

	for warning in &warnings {
		warn!(%warning, "catalog entry dropped or adjusted");
	}

	Normalized {
		categories,
		tiers,
		dietary,
		warnings,
	}
}

fn normalize_dietary(raw: Vec<RawDietaryFilter>, warnings: &mut Vec<CatalogWarning>) -> Vec<DietaryFilter> {
	let mut seen = FxHashSet::default();
	let mut filters = Vec::with_capacity(raw.len());
	for filter in raw {
		if filter.id.is_empty() {
			continue;
		}
		let id = DietaryId::new(filter.id);
		if !seen.insert(id.clone()) {
			warnings.push(CatalogWarning::DuplicateDietaryFilter(id));
			continue;
		}
		filters.push(DietaryFilter {
			label: filter.label.unwrap_or_else(|| id.to_string()),
			icon: filter.icon,
			id,
		});
	}
	filters
}

/// Explicit id, else the slug of the name, else the position.
fn category_id(raw: Option<&str>, name: &str, index: usize) -> CategoryId {
	let id = raw
		.filter(|id| !id.is_empty())
		.map(str::to_string)
		.or_else(|| Some(slugify(name)).filter(|slug| !slug.is_empty()))
		.unwrap_or_else(|| format!("category-{index}"));
	CategoryId::new(id)
}

fn normalize_category(
	raw: RawCategory,
	id: CategoryId,
	name: String,
	known_tags: &FxHashSet<&str>,
	seen_items: &mut FxHashSet<ItemId>,
	warnings: &mut Vec<CatalogWarning>,
) -> Category {
	let entries = raw.elements.into_iter().chain(raw.items.into_iter().map(|entry| match entry {
		RawEntry::Name(name) => RawItem {
			nom: Some(name),
			..RawItem::default()
		},
		RawEntry::Item(item) => item,
	}));

	let mut items = Vec::new();
	for raw_item in entries {
		let Some(item) = normalize_item(raw_item, &id, known_tags, warnings) else {
			warnings.push(CatalogWarning::AnonymousItem { category: id.clone() });
			continue;
		};
		if !seen_items.insert(item.id.clone()) {
			warnings.push(CatalogWarning::DuplicateItem {
				item: item.id,
				category: id.clone(),
			});
			continue;
		}
		items.push(item);
	}

	Category {
		id,
		name,
		icon: raw.icon,
		items,
	}
}

/// Returns `None` for entries with neither id nor name.
fn normalize_item(
	raw: RawItem,
	category: &CategoryId,
	known_tags: &FxHashSet<&str>,
	warnings: &mut Vec<CatalogWarning>,
) -> Option<CatalogItem> {
	let name = raw.nom.unwrap_or_default();
	let id = match raw.id.filter(|id| !id.is_empty()) {
		Some(id) => ItemId::new(id),
		None => {
			let slug = slugify(&name);
			if slug.is_empty() {
				return None;
			}
			ItemId::new(format!("{category}.{slug}"))
		}
	};

	let mut dietary = Vec::with_capacity(raw.dietary.len());
	for tag in raw.dietary {
		if known_tags.contains(tag.as_str()) {
			let tag = DietaryId::new(tag);
			if !dietary.contains(&tag) {
				dietary.push(tag);
			}
		} else {
			warnings.push(CatalogWarning::UnknownDietaryTag {
				item: id.clone(),
				tag: DietaryId::new(tag),
			});
		}
	}

	let mut flags = ItemFlags::empty();
	flags.set(ItemFlags::CHEF_SPECIAL, raw.chef_special);
	flags.set(ItemFlags::PREMIUM, raw.premium);
	flags.set(ItemFlags::SIGNATURE, raw.signature_drink);

	Some(CatalogItem {
		name: if name.is_empty() { id.to_string() } else { name },
		id,
		description: raw.description.unwrap_or_default(),
		category: category.clone(),
		price_indicator: raw.price_indicator.filter(|v| !v.is_null()).map(PriceIndicator::from),
		dietary,
		flags,
		image: raw.image,
		preparation_time: raw.temps_preparation,
		allergens: raw.allergenes,
		extra: raw.extra,
	})
}

/// Item count of a tier. Values that are not a non-negative whole number are
/// reported and treated as absent, which leaves the tier unbounded.
fn item_count(raw: Option<&Value>, tier: &str, warnings: &mut Vec<CatalogWarning>) -> Option<u32> {
	let value = raw?;
	let count = value_as_count(value);
	if count.is_none() {
		warnings.push(CatalogWarning::InvalidQuota {
			tier: TierId::new(tier),
			value: value.to_string(),
		});
	}
	count
}

fn formula_tier(raw: RawFormula, index: usize, warnings: &mut Vec<CatalogWarning>) -> Tier {
	let id = raw.id.filter(|id| !id.is_empty()).unwrap_or_else(|| format!("formule-{index}"));
	// Contact-only formulas go through a manual quote, so no quota applies.
	let quota = if raw.contact_required {
		Quota::Unbounded
	} else {
		Quota::from(item_count(raw.nombre_elements.as_ref(), &id, warnings))
	};
	Tier {
		name: raw.nom.unwrap_or_else(|| id.clone()),
		id: TierId::new(id),
		kind: TierKind::Formula,
		description: raw.description,
		price: raw.prix.as_ref().and_then(value_as_f64),
		quota,
		recommended: raw.recommended,
		contact_required: raw.contact_required,
		badge: raw.badge,
		perks: raw.avantages,
	}
}

fn budget_tier(raw: RawBudget, index: usize, warnings: &mut Vec<CatalogWarning>) -> Tier {
	let id = raw.id.filter(|id| !id.is_empty()).unwrap_or_else(|| format!("budget-{index}"));
	let price = raw.price.as_ref().and_then(value_as_f64);
	let choices = item_count(raw.choices.as_ref(), &id, warnings);
	let name = raw.name.unwrap_or_else(|| match (price, choices) {
		(Some(price), Some(choices)) => format!("{price}$ · {choices} éléments"),
		(Some(price), None) => format!("{price}$"),
		_ => format!("Budget {}", index + 1),
	});
	Tier {
		id: TierId::new(id),
		name,
		kind: TierKind::Budget,
		description: None,
		price,
		quota: Quota::from(choices),
		recommended: false,
		contact_required: false,
		badge: None,
		perks: Vec::new(),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn run(value: serde_json::Value) -> Normalized {
		normalize(serde_json::from_value(value).unwrap())
	}

	#[test]
	fn string_items_get_category_scoped_ids() {
		let out = run(json!({
			"categories": [{ "name": "Entrées", "items": ["Briouates au fromage"] }],
		}));
		let category = &out.categories[0];
		assert_eq!(category.id.as_str(), "entrées");
		assert_eq!(category.items[0].id.as_str(), "entrées.briouates-au-fromage");
		assert_eq!(category.items[0].name, "Briouates au fromage");
	}

	#[test]
	fn unknown_dietary_tags_are_dropped_with_warning() {
		let out = run(json!({
			"dietary_filters": [{ "id": "vegetarian", "label": "Végétarien" }],
			"categories": [{
				"id": "entrees",
				"elements": [{ "id": "e1", "nom": "Zaalouk", "dietary": ["vegetarian", "keto"] }],
			}],
		}));
		assert_eq!(out.categories[0].items[0].dietary, vec![DietaryId::new("vegetarian")]);
		assert_eq!(
			out.warnings,
			vec![CatalogWarning::UnknownDietaryTag {
				item: ItemId::new("e1"),
				tag: DietaryId::new("keto"),
			}]
		);
	}

	#[test]
	fn duplicate_items_across_categories_keep_first() {
		let out = run(json!({
			"categories": [
				{ "id": "a", "elements": [{ "id": "x", "nom": "First" }] },
				{ "id": "b", "elements": [{ "id": "x", "nom": "Second" }, { "id": "y", "nom": "Other" }] },
			],
		}));
		assert_eq!(out.categories[0].items[0].name, "First");
		assert_eq!(out.categories[1].items.len(), 1);
		assert_eq!(out.categories[1].items[0].id.as_str(), "y");
		assert!(matches!(&out.warnings[0], CatalogWarning::DuplicateItem { item, .. } if item.as_str() == "x"));
	}

	#[test]
	fn duplicate_category_does_not_claim_item_ids() {
		let out = run(json!({
			"categories": [
				{ "id": "a", "elements": [{ "id": "x", "nom": "First" }] },
				{ "id": "a", "elements": [{ "id": "y", "nom": "Dropped" }] },
				{ "id": "b", "elements": [{ "id": "y", "nom": "Kept" }] },
			],
		}));
		let ids: Vec<&str> = out.categories.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(out.categories[1].items.len(), 1);
		assert_eq!(out.categories[1].items[0].name, "Kept");
		assert_eq!(out.warnings, [CatalogWarning::DuplicateCategory(CategoryId::new("a"))]);
	}

	#[test]
	fn loose_item_counts_do_not_fail_the_document() {
		let out = run(json!({
			"formules": [
				{ "id": "texte", "nombre_elements": "6" },
				{ "id": "negatif", "nombre_elements": -1 },
				{ "id": "decimal", "nombre_elements": 4.0 },
			],
			"budgets": [{ "price": "40", "choices": " 5 " }, { "price": 30, "choices": "beaucoup" }],
		}));
		let quotas: Vec<Quota> = out.tiers.iter().map(|t| t.quota).collect();
		assert_eq!(
			quotas,
			[Quota::Limited(6), Quota::Unbounded, Quota::Limited(4), Quota::Limited(5), Quota::Unbounded]
		);
		assert_eq!(out.tiers[3].name, "40$ · 5 éléments");
		assert_eq!(out.tiers[4].name, "30$");
		assert_eq!(
			out.warnings,
			[
				CatalogWarning::InvalidQuota {
					tier: TierId::new("negatif"),
					value: "-1".to_string(),
				},
				CatalogWarning::InvalidQuota {
					tier: TierId::new("budget-1"),
					value: "\"beaucoup\"".to_string(),
				},
			]
		);
	}

	#[test]
	fn formulas_and_budgets_share_one_shape() {
		let out = run(json!({
			"formules": [
				{ "id": "standard", "nom": "Standard", "prix": 45, "nombre_elements": 6 },
				{ "id": "prestige", "nom": "Prestige", "prix": null, "contact_required": true, "nombre_elements": 10 },
			],
			"budgets": [{ "price": 30, "choices": 4 }],
		}));
		let [standard, prestige, budget] = out.tiers.as_slice() else {
			panic!("expected three tiers, got {:?}", out.tiers);
		};
		assert_eq!(standard.quota, Quota::Limited(6));
		assert_eq!(standard.price, Some(45.0));
		assert_eq!(prestige.quota, Quota::Unbounded);
		assert_eq!(prestige.price, None);
		assert_eq!(budget.id.as_str(), "budget-0");
		assert_eq!(budget.kind, TierKind::Budget);
		assert_eq!(budget.quota, Quota::Limited(4));
		assert_eq!(budget.name, "30$ · 4 éléments");
	}

	#[test]
	fn item_flags_and_details() {
		let out = run(json!({
			"categories": [{
				"id": "plats",
				"elements": [{
					"id": "p1",
					"nom": "Méchoui",
					"chef_special": true,
					"signature_drink": true,
					"price_indicator": "$$$",
					"temps_preparation": "6h",
					"allergenes": ["sésame"],
				}],
			}],
		}));
		let item = &out.categories[0].items[0];
		assert_eq!(item.flags, ItemFlags::CHEF_SPECIAL | ItemFlags::SIGNATURE);
		assert_eq!(item.price_indicator.as_ref().map(PriceIndicator::level), Some(3));
		assert_eq!(item.preparation_time.as_deref(), Some("6h"));
		assert_eq!(item.allergens, vec!["sésame".to_string()]);
	}
}
