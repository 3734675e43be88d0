//! Quota-bound selection state.
//!
//! [`SelectionStore`] owns the active tier and the selection and is the only
//! place either changes. Every operation is synchronous and total; expected
//! refusals come back as [`Rejection`] values rather than errors.

use arabesque_catalog::{Catalog, ItemId, Quota, Tier, TierId};
use serde::Serialize;
use tracing::debug;

use crate::selection::{SelectedItem, Selection};
use crate::view::SelectionSnapshot;

/// Why a command left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
	/// Items can only be added once a tier is chosen.
	NoActiveTier,
	/// The active tier's quota is already reached.
	QuotaExceeded { max: u32 },
	/// The selection holds `excess` more items than `tier` admits.
	QuotaConflict { tier: TierId, excess: usize },
	/// The item exists in the catalog, but not under the given category.
	UnknownItem { item: ItemId },
	UnknownTier { tier: TierId },
}

/// Result of [`SelectionStore::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
	Added,
	/// The entry was removed. `stale` is set when the id no longer exists in
	/// the catalog (a leftover from an older menu).
	Removed { stale: bool },
	/// The id is neither selected nor in the catalog. Nothing changed and
	/// nothing is reported.
	Stale,
	Rejected(Rejection),
}

impl ToggleOutcome {
	/// Whether the selection changed.
	pub fn is_change(&self) -> bool {
		matches!(self, Self::Added | Self::Removed { .. })
	}
}

/// Result of [`SelectionStore::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
	Removed { stale: bool },
	/// Nothing was selected under that id.
	Absent,
}

/// Result of [`SelectionStore::select_tier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
	Selected { previous: Option<TierId> },
	Rejected(Rejection),
}

impl TierOutcome {
	pub fn is_change(&self) -> bool {
		matches!(self, Self::Selected { .. })
	}
}

/// Active tier plus the current selection.
///
/// Invariant: when a tier with a finite quota is active, the selection never
/// holds more items than that quota.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
	tier: Option<Tier>,
	selection: Selection,
}

impl SelectionStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts from a restored selection with no tier chosen.
	pub fn with_selection(selection: Selection) -> Self {
		Self { tier: None, selection }
	}

	pub fn tier(&self) -> Option<&Tier> {
		self.tier.as_ref()
	}

	/// Quota of the active tier; unbounded when none is chosen.
	pub fn quota(&self) -> Quota {
		self.tier.as_ref().map_or(Quota::Unbounded, |tier| tier.quota)
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn len(&self) -> usize {
		self.selection.len()
	}

	pub fn is_empty(&self) -> bool {
		self.selection.is_empty()
	}

	/// Whether another item could be added right now.
	pub fn can_add(&self) -> bool {
		self.tier.is_some() && self.quota().admits_one_more(self.selection.len())
	}

	/// Makes `tier` active unless the current selection exceeds its quota.
	pub fn select_tier(&mut self, tier: &Tier) -> TierOutcome {
		let excess = tier.quota.excess(self.selection.len());
		if excess > 0 {
			debug!(tier = %tier.id, excess, "tier change rejected");
			return TierOutcome::Rejected(Rejection::QuotaConflict {
				tier: tier.id.clone(),
				excess,
			});
		}
		let previous = self.tier.replace(tier.clone()).map(|t| t.id);
		TierOutcome::Selected { previous }
	}

	/// Adds the item if absent, removes it if present.
	///
	/// Removal always succeeds, including for ids the catalog no longer
	/// knows. An unselected id the catalog does not know is a silent no-op.
	/// Adding requires an active tier, an item that resolves under
	/// `category`, and room in the quota.
	pub fn toggle(&mut self, catalog: &Catalog, item: &str, category: &str) -> ToggleOutcome {
		if let RemoveOutcome::Removed { stale } = self.remove(catalog, item) {
			return ToggleOutcome::Removed { stale };
		}
		if !catalog.contains_item(item) {
			debug!(item, category, "ignoring toggle of stale id");
			return ToggleOutcome::Stale;
		}
		let Some(tier) = &self.tier else {
			debug!(item, "add rejected: no active tier");
			return ToggleOutcome::Rejected(Rejection::NoActiveTier);
		};
		let Some(found) = catalog.item_in(item, category) else {
			debug!(item, category, "add rejected: unknown item");
			return ToggleOutcome::Rejected(Rejection::UnknownItem { item: ItemId::new(item) });
		};
		if let Quota::Limited(max) = tier.quota {
			if !tier.quota.admits_one_more(self.selection.len()) {
				debug!(item, max, "add rejected: quota reached");
				return ToggleOutcome::Rejected(Rejection::QuotaExceeded { max });
			}
		}
		self.selection.insert(SelectedItem::from(found));
		ToggleOutcome::Added
	}

	/// Removes by id alone.
	pub fn remove(&mut self, catalog: &Catalog, item: &str) -> RemoveOutcome {
		if self.selection.remove(item).is_none() {
			return RemoveOutcome::Absent;
		}
		let stale = !catalog.contains_item(item);
		if stale {
			debug!(item, "dropped stale selection entry");
		}
		RemoveOutcome::Removed { stale }
	}

	/// Empties the selection. Returns true if anything was removed.
	pub fn clear(&mut self) -> bool {
		let changed = !self.selection.is_empty();
		self.selection.clear();
		changed
	}

	pub fn snapshot(&self) -> SelectionSnapshot {
		SelectionSnapshot::capture(self)
	}
}

#[cfg(test)]
mod tests;
