//! One-shot asynchronous catalog loading.
//!
//! A [`CatalogLoader`] fetches its source at most once. Callers that ask for
//! the catalog while the fetch is in flight wait on the same pending result,
//! and every later call observes the settled outcome, success or failure.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Something that can produce the raw catalog document.
#[async_trait]
pub trait CatalogSource: Send + Sync {
	/// Fetches the document text.
	async fn fetch(&self) -> Result<String>;

	/// Human-readable locator for logs.
	fn describe(&self) -> String;
}

/// Reads the catalog from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
	path: PathBuf,
}

impl FileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

#[async_trait]
impl CatalogSource for FileSource {
	async fn fetch(&self) -> Result<String> {
		tokio::fs::read_to_string(&self.path).await.map_err(|e| CatalogError::Io {
			path: self.path.clone(),
			message: e.to_string(),
		})
	}

	fn describe(&self) -> String {
		self.path.display().to_string()
	}
}

/// Serves a document held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
	document: Arc<str>,
}

impl InlineSource {
	pub fn new(document: impl Into<Arc<str>>) -> Self {
		Self {
			document: document.into(),
		}
	}
}

#[async_trait]
impl CatalogSource for InlineSource {
	async fn fetch(&self) -> Result<String> {
		Ok(self.document.to_string())
	}

	fn describe(&self) -> String {
		format!("inline ({} bytes)", self.document.len())
	}
}

/// Loads and caches one catalog for the lifetime of a page session.
pub struct CatalogLoader {
	source: Arc<dyn CatalogSource>,
	settled: OnceCell<Result<Arc<Catalog>>>,
}

impl fmt::Debug for CatalogLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalogLoader")
			.field("source", &self.source.describe())
			.field("settled", &self.settled.initialized())
			.finish()
	}
}

impl CatalogLoader {
	pub fn new(source: impl CatalogSource + 'static) -> Self {
		Self::from_arc(Arc::new(source))
	}

	pub fn from_arc(source: Arc<dyn CatalogSource>) -> Self {
		Self {
			source,
			settled: OnceCell::new(),
		}
	}

	/// Returns the catalog, fetching it on first use.
	///
	/// Concurrent callers share a single fetch. A failure is settled too: the
	/// source is not retried for the lifetime of this loader.
	pub async fn load(&self) -> Result<Arc<Catalog>> {
		self.settled.get_or_init(|| self.fetch_and_parse()).await.clone()
	}

	/// The settled outcome, if loading has completed.
	pub fn settled(&self) -> Option<&Result<Arc<Catalog>>> {
		self.settled.get()
	}

	async fn fetch_and_parse(&self) -> Result<Arc<Catalog>> {
		let source = self.source.describe();
		info!(%source, "loading catalog");
		let outcome = match self.source.fetch().await {
			Ok(text) => Catalog::from_json(&text),
			Err(e) => Err(e),
		};
		match outcome {
			Ok(catalog) => {
				info!(
					%source,
					categories = catalog.categories().len(),
					items = catalog.items().count(),
					tiers = catalog.tiers().len(),
					warnings = catalog.warnings().len(),
					"catalog loaded"
				);
				Ok(Arc::new(catalog))
			}
			Err(e) => {
				error!(%source, error = %e, "catalog unavailable");
				Err(e)
			}
		}
	}
}
