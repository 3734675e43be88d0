//! Menu catalog for the Arabesque menu builder.
//!
//! The catalog is the externally supplied, read-only menu content: categories
//! of items, pricing tiers and dietary filters. This crate parses the provider
//! document, normalizes its two historical layouts into one model, cross-checks
//! references, and loads it once per page session.
//!
//! # Document layouts
//!
//! ```json
//! {
//!   "formules": [{ "id": "standard", "nom": "Standard", "prix": 45, "nombre_elements": 6 }],
//!   "budgets": [{ "price": 30, "choices": 3 }],
//!   "dietary_filters": [{ "id": "vegetarian", "label": "Végétarien", "icon": "🥗" }],
//!   "categories": [
//!     { "id": "entrees", "nom": "Entrées", "elements": [{ "id": "zaalouk", "nom": "Zaalouk" }] },
//!     { "name": "Desserts", "items": ["Cornes de gazelle"] }
//!   ]
//! }
//! ```
//!
//! Formulas and budgets both become [`Tier`]s. Dietary tags that do not
//! resolve are dropped and reported through [`Catalog::warnings`].

pub mod catalog;
pub mod document;
pub mod error;
pub mod ids;
pub mod loader;
pub mod model;
mod normalize;

pub use catalog::{Catalog, SearchHit, SearchOptions};
pub use error::{CatalogError, CatalogWarning, Result};
pub use ids::{CategoryId, DietaryId, ItemId, TierId};
pub use loader::{CatalogLoader, CatalogSource, FileSource, InlineSource};
pub use model::{Category, CatalogItem, DietaryFilter, ItemFlags, PriceIndicator, Quota, Tier, TierKind};
