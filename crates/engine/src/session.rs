//! The per-page session controller.
//!
//! A [`MenuSession`] owns every piece of mutable state for one page: the
//! store, the tier binding, the filters, the persistence adapter, the view
//! channels and the notice queue. UI events map one-to-one onto its `on_*`
//! handlers. Each handler runs to completion, persists the selection, then
//! publishes fresh snapshots. Rejected and stale commands write nothing.

use std::sync::Arc;

use arabesque_catalog::{Catalog, CatalogError, CatalogLoader, DietaryId, SearchHit, SearchOptions, Tier};
use tracing::{debug, info, warn};

use crate::binding::TierBinding;
use crate::config::Profile;
use crate::filter::{CategoryFilter, DietarySet, FilterState};
use crate::notice::{Notice, NoticeCenter, NoticeKind};
use crate::persist::{LoadOutcome, PersistenceAdapter, SaveOutcome};
use crate::quote::QuoteRequest;
use crate::selection::Selection;
use crate::store::{RemoveOutcome, SelectionStore, TierOutcome, ToggleOutcome};
use crate::view::{SelectionSnapshot, ViewSync, VisibleSet};

/// Per-session settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
	pub profile: Profile,
	pub search: SearchOptions,
}

/// State and command handlers of one menu page.
#[derive(Debug)]
pub struct MenuSession {
	catalog: Arc<Catalog>,
	store: SelectionStore,
	binding: TierBinding,
	filters: FilterState,
	persistence: PersistenceAdapter,
	view: ViewSync,
	notices: NoticeCenter,
	search: SearchOptions,
}

impl MenuSession {
	/// Restores the persisted selection, applies the profile's default tier
	/// and publishes the first snapshots.
	pub fn open(catalog: Arc<Catalog>, persistence: PersistenceAdapter, options: SessionOptions) -> Self {
		let mut notices = NoticeCenter::new();
		let restored = restore(&persistence, &mut notices);
		let mut store = SelectionStore::with_selection(restored);
		let mut binding = TierBinding::new(options.profile);

		if let Some(tier) = binding.default_tier(&catalog).map(|t| t.id.clone()) {
			if let TierOutcome::Rejected(rejection) = binding.select(&mut store, &catalog, tier.as_str()) {
				// The restored selection is larger than the default tier allows.
				notices.push(NoticeKind::from(rejection));
			}
		}

		let session = Self {
			catalog,
			store,
			binding,
			filters: FilterState::default(),
			persistence,
			view: ViewSync::new(),
			notices,
			search: options.search,
		};
		info!(
			profile = ?options.profile,
			restored = session.store.len(),
			tier = ?session.binding.highlighted(),
			"menu session opened"
		);
		session.publish();
		session
	}

	pub fn catalog(&self) -> &Arc<Catalog> {
		&self.catalog
	}

	pub fn profile(&self) -> Profile {
		self.binding.profile()
	}

	/// Tiers this page lists.
	pub fn offered_tiers(&self) -> Vec<&Tier> {
		self.binding.offered(&self.catalog)
	}

	pub fn active_tier(&self) -> Option<&Tier> {
		self.store.tier()
	}

	pub fn selection(&self) -> &Selection {
		self.store.selection()
	}

	pub fn filters(&self) -> &FilterState {
		&self.filters
	}

	pub fn view(&self) -> &ViewSync {
		&self.view
	}

	/// Latest published selection snapshot.
	pub fn snapshot(&self) -> Arc<SelectionSnapshot> {
		self.view.selection()
	}

	/// Latest published visible set.
	pub fn visible(&self) -> Arc<VisibleSet> {
		self.view.visible()
	}

	pub fn take_notices(&mut self) -> Vec<Notice> {
		self.notices.take_pending()
	}

	pub fn on_tier_change(&mut self, tier: &str) -> TierOutcome {
		let outcome = self.binding.select(&mut self.store, &self.catalog, tier);
		match &outcome {
			TierOutcome::Selected { .. } => self.commit(),
			TierOutcome::Rejected(rejection) => {
				self.notices.push(NoticeKind::from(rejection.clone()));
			}
		}
		outcome
	}

	/// Empties the selection and switches tier in one step.
	pub fn on_clear_and_select(&mut self, tier: &str) -> TierOutcome {
		let outcome = self.binding.clear_and_select(&mut self.store, &self.catalog, tier);
		match &outcome {
			TierOutcome::Selected { .. } => self.commit(),
			TierOutcome::Rejected(rejection) => {
				self.notices.push(NoticeKind::from(rejection.clone()));
			}
		}
		outcome
	}

	pub fn on_toggle(&mut self, item: &str, category: &str) -> ToggleOutcome {
		let outcome = self.store.toggle(&self.catalog, item, category);
		match &outcome {
			ToggleOutcome::Added | ToggleOutcome::Removed { .. } => self.commit(),
			ToggleOutcome::Stale => {}
			ToggleOutcome::Rejected(rejection) => self.notices.push(NoticeKind::from(rejection.clone())),
		}
		outcome
	}

	/// Removal from the selection summary, which only knows the item id.
	pub fn on_remove(&mut self, item: &str) -> RemoveOutcome {
		let outcome = self.store.remove(&self.catalog, item);
		if let RemoveOutcome::Removed { .. } = outcome {
			self.commit();
		}
		outcome
	}

	/// Returns true if anything was removed. The slot is rewritten either
	/// way, since another page may have filled it since this one loaded.
	pub fn on_clear(&mut self) -> bool {
		let changed = self.store.clear();
		self.commit();
		changed
	}

	/// Returns true if the visible set changed.
	pub fn on_category_filter(&mut self, filter: impl Into<CategoryFilter>) -> bool {
		let changed = self.filters.set_category(filter.into());
		if changed {
			self.publish_visible();
		}
		changed
	}

	/// Turns one dietary tag on or off. Tags the catalog does not define are
	/// ignored.
	pub fn on_dietary_toggle(&mut self, tag: &str, active: bool) -> bool {
		let tag = DietaryId::new(tag);
		if !self.catalog.is_known_tag(&tag) {
			debug!(%tag, "ignoring unknown dietary tag");
			return false;
		}
		let changed = self.filters.set_tag(tag, active);
		if changed {
			self.publish_visible();
		}
		changed
	}

	/// Replaces the whole dietary set, dropping tags the catalog does not
	/// define.
	pub fn on_dietary_set<I, T>(&mut self, tags: I) -> bool
	where
		I: IntoIterator<Item = T>,
		T: Into<DietaryId>,
	{
		let tags: DietarySet = tags
			.into_iter()
			.map(Into::into)
			.filter(|tag| self.catalog.is_known_tag(tag))
			.collect();
		let changed = self.filters.set_tags(tags);
		if changed {
			self.publish_visible();
		}
		changed
	}

	/// The quote payload, or `None` while nothing is selected.
	pub fn quote_request(&self) -> Option<QuoteRequest> {
		if self.store.is_empty() {
			return None;
		}
		Some(QuoteRequest::build(&self.catalog, &self.store, &self.filters))
	}

	pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
		self.catalog.search(query, self.search)
	}

	/// Writes the selection one last time and ends the session.
	pub fn close(self) -> SaveOutcome {
		debug!(count = self.store.len(), "menu session closed");
		self.persistence.save(self.store.selection())
	}

	/// Persists the selection, then publishes.
	fn commit(&mut self) {
		if let SaveOutcome::Ignored(_) = self.persistence.save(self.store.selection()) {
			self.notices.push(NoticeKind::StorageUnavailable);
		}
		self.publish();
	}

	/// The visible set carries selection flags, so it goes out as well.
	fn publish(&self) {
		self.view.publish_selection(self.store.snapshot());
		self.publish_visible();
	}

	fn publish_visible(&self) {
		self.view
			.publish_visible(VisibleSet::compute(&self.catalog, &self.filters, &self.store));
	}
}

fn restore(persistence: &PersistenceAdapter, notices: &mut NoticeCenter) -> Selection {
	match persistence.load() {
		LoadOutcome::Restored(selection) => selection,
		LoadOutcome::Empty => Selection::new(),
		LoadOutcome::Ignored(_) => {
			notices.push(NoticeKind::StorageUnavailable);
			Selection::new()
		}
	}
}

/// A session whose catalog failed to load.
///
/// Menu building stays disabled. The restored selection is still available
/// so the page can show what the visitor picked earlier.
#[derive(Debug)]
pub struct DegradedSession {
	pub error: CatalogError,
	pub restored: Selection,
	pub notices: Vec<Notice>,
}

/// Result of [`start`].
#[derive(Debug)]
pub enum Startup {
	Ready(MenuSession),
	Degraded(DegradedSession),
}

impl Startup {
	pub fn ready(self) -> Option<MenuSession> {
		match self {
			Self::Ready(session) => Some(session),
			Self::Degraded(_) => None,
		}
	}
}

/// Loads the catalog and opens a session over it.
pub async fn start(loader: &CatalogLoader, persistence: PersistenceAdapter, options: SessionOptions) -> Startup {
	match loader.load().await {
		Ok(catalog) => Startup::Ready(MenuSession::open(catalog, persistence, options)),
		Err(error) => {
			warn!(%error, "menu disabled: catalog unavailable");
			let mut notices = NoticeCenter::new();
			notices.push(NoticeKind::CatalogUnavailable {
				reason: error.to_string(),
			});
			let restored = restore(&persistence, &mut notices);
			Startup::Degraded(DegradedSession {
				error,
				restored,
				notices: notices.take_pending(),
			})
		}
	}
}
