//! Catalog providers.
//!
//! The packager takes an already-materialized snapshot; providers are how a
//! caller gets one. A provider never caches or retries: every `fetch` either
//! yields a fresh snapshot or reports why it couldn't.

use crate::error::Result;
use crate::types::Catalog;
use std::path::PathBuf;
use std::sync::Arc;

/// Source of catalog snapshots.
///
/// `Send + Sync` so one provider can be shared by concurrent requests.
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// Produce the current catalog snapshot
    fn fetch(&self) -> Result<Arc<Catalog>>;
}

/// Re-reads a catalog file on every fetch
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for FileCatalogProvider {
    fn name(&self) -> &str {
        "FileCatalogProvider"
    }

    fn fetch(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::new(Catalog::load_from_file(&self.path)?))
    }
}

/// Hands out the same in-memory snapshot every time
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    catalog: Arc<Catalog>,
}

impl StaticCatalogProvider {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn name(&self) -> &str {
        "StaticCatalogProvider"
    }

    fn fetch(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::clone(&self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::types::Offering;

    #[test]
    fn test_static_provider_shares_snapshot() {
        let catalog = Arc::new(Catalog::from_offerings(vec![Offering::new("venue", 1.0)]));
        let provider = StaticCatalogProvider::new(Arc::clone(&catalog));

        let fetched = provider.fetch().unwrap();
        assert!(Arc::ptr_eq(&catalog, &fetched));
    }

    #[test]
    fn test_file_provider_missing_file() {
        let provider = FileCatalogProvider::new("no/such/catalog.json");
        let err = provider.fetch().unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
