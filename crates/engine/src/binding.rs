//! Tier choice on top of the store.

use arabesque_catalog::{Catalog, Tier, TierId, TierKind};

use crate::config::Profile;
use crate::store::{Rejection, SelectionStore, TierOutcome};

/// Tracks the highlighted tier and resolves tier ids for the store.
///
/// The highlight only moves when the store accepts the tier, so it always
/// matches the store's active tier.
#[derive(Debug, Clone, Default)]
pub struct TierBinding {
	profile: Profile,
	highlighted: Option<TierId>,
}

impl TierBinding {
	pub fn new(profile: Profile) -> Self {
		Self {
			profile,
			highlighted: None,
		}
	}

	pub fn profile(&self) -> Profile {
		self.profile
	}

	pub fn highlighted(&self) -> Option<&TierId> {
		self.highlighted.as_ref()
	}

	/// Tiers the page lists, in document order.
	///
	/// The configurator lists budgets, or formulas when the document has no
	/// budgets.
	pub fn offered<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Tier> {
		match self.profile {
			Profile::Builder => catalog.tiers_of(TierKind::Formula).collect(),
			Profile::Configurator => {
				let budgets: Vec<_> = catalog.tiers_of(TierKind::Budget).collect();
				if budgets.is_empty() {
					catalog.tiers_of(TierKind::Formula).collect()
				} else {
					budgets
				}
			}
		}
	}

	/// Tier to activate when the page opens.
	pub fn default_tier<'a>(&self, catalog: &'a Catalog) -> Option<&'a Tier> {
		match self.profile {
			Profile::Builder => None,
			Profile::Configurator => self.offered(catalog).into_iter().next(),
		}
	}

	pub fn select(&mut self, store: &mut SelectionStore, catalog: &Catalog, tier: &str) -> TierOutcome {
		let Some(found) = catalog.tier(tier) else {
			return TierOutcome::Rejected(Rejection::UnknownTier { tier: TierId::new(tier) });
		};
		let outcome = store.select_tier(found);
		if outcome.is_change() {
			self.highlighted = Some(found.id.clone());
		}
		outcome
	}

	/// Resolves a quota conflict by emptying the selection first.
	///
	/// An unknown tier leaves the selection untouched.
	pub fn clear_and_select(&mut self, store: &mut SelectionStore, catalog: &Catalog, tier: &str) -> TierOutcome {
		if catalog.tier(tier).is_none() {
			return TierOutcome::Rejected(Rejection::UnknownTier { tier: TierId::new(tier) });
		}
		store.clear();
		self.select(store, catalog, tier)
	}
}
