//! Integration tests for one-shot catalog loading.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arabesque_catalog::{CatalogError, CatalogLoader, CatalogSource, FileSource, InlineSource, Result};
use async_trait::async_trait;

const MENU: &str = include_str!("fixtures/menu.json");

fn fixture_path() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/menu.json")
}

/// Source that counts fetches and answers after a short delay.
struct CountingSource {
	fetches: Arc<AtomicUsize>,
	response: Result<String>,
}

#[async_trait]
impl CatalogSource for CountingSource {
	async fn fetch(&self) -> Result<String> {
		self.fetches.fetch_add(1, Ordering::SeqCst);
		tokio::time::sleep(Duration::from_millis(20)).await;
		self.response.clone()
	}

	fn describe(&self) -> String {
		"counting".to_string()
	}
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
	let _ = tracing_subscriber::fmt::try_init();
	let fetches = Arc::new(AtomicUsize::new(0));
	let loader = CatalogLoader::new(CountingSource {
		fetches: fetches.clone(),
		response: Ok(MENU.to_string()),
	});

	let (a, b, c) = tokio::join!(loader.load(), loader.load(), loader.load());
	let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

	assert_eq!(fetches.load(Ordering::SeqCst), 1);
	assert!(Arc::ptr_eq(&a, &b));
	assert!(Arc::ptr_eq(&b, &c));

	let later = loader.load().await.unwrap();
	assert!(Arc::ptr_eq(&a, &later));
	assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failure_is_settled_and_shared() {
	let fetches = Arc::new(AtomicUsize::new(0));
	let loader = CatalogLoader::new(CountingSource {
		fetches: fetches.clone(),
		response: Err(CatalogError::Source {
			source_name: "counting".to_string(),
			message: "503".to_string(),
		}),
	});

	let (a, b) = tokio::join!(loader.load(), loader.load());
	assert!(matches!(a, Err(CatalogError::Source { .. })));
	assert_eq!(a.unwrap_err(), b.unwrap_err());
	assert!(loader.load().await.is_err());
	assert_eq!(fetches.load(Ordering::SeqCst), 1);
	assert!(loader.settled().is_some_and(|outcome| outcome.is_err()));
}

#[tokio::test]
async fn file_source_reads_fixture() {
	let loader = CatalogLoader::new(FileSource::new(fixture_path()));
	assert!(loader.settled().is_none());
	let catalog = loader.load().await.unwrap();
	assert_eq!(catalog.categories().len(), 3);
	assert!(catalog.item("the-menthe").is_some());
}

#[tokio::test]
async fn missing_file_is_unavailable() {
	let loader = CatalogLoader::new(FileSource::new("/nonexistent/arabesque/menu.json"));
	match loader.load().await {
		Err(CatalogError::Io { path, .. }) => assert_eq!(path, PathBuf::from("/nonexistent/arabesque/menu.json")),
		other => panic!("expected Io error, got {other:?}"),
	}
}

#[tokio::test]
async fn garbage_document_is_unavailable() {
	let loader = CatalogLoader::new(InlineSource::new("<html>502 Bad Gateway</html>"));
	assert!(matches!(loader.load().await, Err(CatalogError::Parse(_))));
}
