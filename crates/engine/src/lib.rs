//! Selection state engine for the Arabesque menu pages.
//!
//! Visitors pick a pricing tier, then choose menu items up to the tier's
//! quota. The engine owns that state and everything derived from it:
//!
//! * [`SelectionStore`] holds the active tier and the selection and enforces
//!   the quota.
//! * [`PersistenceAdapter`] mirrors the selection into a key-value slot that
//!   both pages share.
//! * [`visible_items`] derives the browsable list from category and dietary
//!   filters.
//! * [`ViewSync`] publishes full display snapshots after every change.
//! * [`MenuSession`] wires the above together behind one handler per UI
//!   event, and [`start`] opens it once the catalog has loaded.
//!
//! Expected refusals (quota reached, no tier chosen, storage unavailable) are
//! outcome values plus queued [`Notice`]s, never errors.

pub mod binding;
pub mod config;
pub mod error;
pub mod filter;
pub mod notice;
pub mod persist;
pub mod quote;
pub mod selection;
pub mod session;
pub mod store;
pub mod view;

pub use binding::TierBinding;
pub use config::{EngineConfig, Profile, SearchConfig};
pub use error::{ConfigError, StorageError};
pub use filter::{ALL_CATEGORIES, CategoryFilter, DietarySet, FilterState, visible_items};
pub use notice::{AutoDismiss, Level, Notice, NoticeCenter, NoticeKind};
#[cfg(target_arch = "wasm32")]
pub use persist::LocalStorage;
pub use persist::{
	DEFAULT_STORAGE_KEY, DisabledStorage, FileStorage, LoadOutcome, MemoryStorage, PersistenceAdapter, SaveOutcome,
	SlotStorage, decode_selection,
};
pub use quote::{QuoteLine, QuoteRequest};
pub use selection::{SelectedItem, Selection};
pub use session::{DegradedSession, MenuSession, SessionOptions, Startup, start};
pub use store::{Rejection, RemoveOutcome, SelectionStore, TierOutcome, ToggleOutcome};
pub use view::{SelectionSnapshot, TierSummary, ViewSync, VisibleEntry, VisibleSet};
