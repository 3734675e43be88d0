//! Display-ready snapshots and their publication.
//!
//! Renderers never read the store directly. They subscribe to a [`ViewSync`]
//! and redraw from the latest [`SelectionSnapshot`] and [`VisibleSet`], each
//! of which fully replaces the previous one.

use std::sync::Arc;

use arabesque_catalog::{Catalog, CatalogItem, DietaryId, Tier, TierId, TierKind};
use serde::Serialize;
use tokio::sync::watch;

use crate::filter::{CategoryFilter, FilterState};
use crate::selection::SelectedItem;
use crate::store::SelectionStore;

/// What a renderer needs to know about a tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
	pub id: TierId,
	pub name: String,
	pub kind: TierKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	pub max_items: Option<u32>,
	pub contact_required: bool,
}

impl From<&Tier> for TierSummary {
	fn from(tier: &Tier) -> Self {
		Self {
			id: tier.id.clone(),
			name: tier.name.clone(),
			kind: tier.kind,
			price: tier.price,
			max_items: tier.max_items(),
			contact_required: tier.contact_required,
		}
	}
}

/// Immutable picture of the selection after a mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionSnapshot {
	pub tier: Option<TierSummary>,
	/// Selected items in insertion order.
	pub items: Vec<SelectedItem>,
	pub count: usize,
	/// Quota of the active tier; `None` when unbounded or no tier is chosen.
	pub max: Option<u32>,
	pub remaining_slots: Option<u32>,
	/// Fill level of a finite quota, clamped to 100.
	pub progress_percent: Option<u8>,
	pub can_clear: bool,
	pub can_request_quote: bool,
	pub can_add: bool,
}

impl SelectionSnapshot {
	pub fn capture(store: &SelectionStore) -> Self {
		let count = store.len();
		let quota = store.quota();
		let max = quota.max();
		Self {
			tier: store.tier().map(TierSummary::from),
			items: store.selection().iter().cloned().collect(),
			count,
			max,
			remaining_slots: quota.remaining(count),
			progress_percent: max.map(|max| progress(count, max)),
			can_clear: count > 0,
			can_request_quote: count > 0,
			can_add: store.can_add(),
		}
	}

	pub fn is_selected(&self, item: &str) -> bool {
		self.items.iter().any(|entry| entry.id.as_str() == item)
	}
}

fn progress(count: usize, max: u32) -> u8 {
	if max == 0 {
		return 100;
	}
	(count.saturating_mul(100) / max as usize).min(100) as u8
}

/// A visible item with its interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleEntry {
	pub item: CatalogItem,
	pub selected: bool,
	/// Whether toggling would add the item. Selected entries can always be
	/// toggled off, so this is only meaningful when `selected` is false.
	pub can_add: bool,
}

/// The filtered item list plus the filters that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSet {
	pub category: CategoryFilter,
	pub dietary: Vec<DietaryId>,
	pub entries: Vec<VisibleEntry>,
}

impl VisibleSet {
	pub fn compute(catalog: &Catalog, filters: &FilterState, store: &SelectionStore) -> Self {
		let can_add = store.can_add();
		let entries = filters
			.visible(catalog)
			.into_iter()
			.map(|item| {
				let selected = store.selection().contains(item.id.as_str());
				VisibleEntry {
					item: item.clone(),
					selected,
					can_add: !selected && can_add,
				}
			})
			.collect();
		Self {
			category: filters.category().clone(),
			dietary: filters.dietary().iter().cloned().collect(),
			entries,
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
		self.entries.iter().map(|entry| &entry.item)
	}
}

/// Latest-value channels for both display states.
#[derive(Debug)]
pub struct ViewSync {
	selection_tx: watch::Sender<Arc<SelectionSnapshot>>,
	visible_tx: watch::Sender<Arc<VisibleSet>>,
}

impl Default for ViewSync {
	fn default() -> Self {
		Self::new()
	}
}

impl ViewSync {
	pub fn new() -> Self {
		let (selection_tx, _) = watch::channel(Arc::default());
		let (visible_tx, _) = watch::channel(Arc::default());
		Self {
			selection_tx,
			visible_tx,
		}
	}

	/// Replaces the published selection snapshot.
	pub fn publish_selection(&self, snapshot: SelectionSnapshot) {
		self.selection_tx.send_replace(Arc::new(snapshot));
	}

	/// Replaces the published visible set.
	pub fn publish_visible(&self, visible: VisibleSet) {
		self.visible_tx.send_replace(Arc::new(visible));
	}

	pub fn selection(&self) -> Arc<SelectionSnapshot> {
		self.selection_tx.borrow().clone()
	}

	pub fn visible(&self) -> Arc<VisibleSet> {
		self.visible_tx.borrow().clone()
	}

	pub fn subscribe_selection(&self) -> watch::Receiver<Arc<SelectionSnapshot>> {
		self.selection_tx.subscribe()
	}

	pub fn subscribe_visible(&self) -> watch::Receiver<Arc<VisibleSet>> {
		self.visible_tx.subscribe()
	}
}
