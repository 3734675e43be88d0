//! Engine configuration.
//!
//! Read from TOML; every field has a default so an empty file (or no file)
//! yields a working configuration:
//!
//! ```toml
//! storage_key = "arabesque_selection"
//! catalog_path = "data/menu.json"
//! profile = "configurator"
//!
//! [search]
//! min_query = 2
//! limit = 5
//! ```

use std::path::{Path, PathBuf};

use arabesque_catalog::SearchOptions;
use arabesque_catalog::catalog::{DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_MIN_QUERY};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persist::DEFAULT_STORAGE_KEY;
use crate::session::SessionOptions;

/// Which page the session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
	/// Menu builder: offers formulas, no tier chosen at startup.
	#[default]
	Builder,
	/// Menu configurator: offers budgets and starts on the first one.
	Configurator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
	pub min_query: usize,
	pub limit: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			min_query: DEFAULT_SEARCH_MIN_QUERY,
			limit: DEFAULT_SEARCH_LIMIT,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Slot the selection is persisted under.
	pub storage_key: String,
	/// Directory for file-backed storage. Defaults to the platform data dir.
	pub storage_dir: Option<PathBuf>,
	pub catalog_path: PathBuf,
	pub profile: Profile,
	pub search: SearchConfig,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			storage_key: DEFAULT_STORAGE_KEY.to_string(),
			storage_dir: None,
			catalog_path: PathBuf::from("data/menu.json"),
			profile: Profile::default(),
			search: SearchConfig::default(),
		}
	}
}

impl EngineConfig {
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&input)
	}

	/// Directory for [`FileStorage`](crate::persist::FileStorage).
	///
	/// Falls back to `<data dir>/arabesque`, or `./arabesque` on platforms
	/// without one.
	pub fn resolved_storage_dir(&self) -> PathBuf {
		self.storage_dir.clone().unwrap_or_else(|| {
			dirs::data_dir()
				.unwrap_or_else(|| PathBuf::from("."))
				.join("arabesque")
		})
	}

	pub fn search_options(&self) -> SearchOptions {
		SearchOptions {
			min_query: self.search.min_query,
			limit: self.search.limit,
		}
	}

	pub fn session_options(&self) -> SessionOptions {
		SessionOptions {
			profile: self.profile,
			search: self.search_options(),
		}
	}
}
