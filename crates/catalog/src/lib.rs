//! # Catalog Crate
//!
//! Loads and indexes the pool of service offerings that packages are built
//! from.
//!
//! ## Main Components
//!
//! - **types**: `Offering`, `Catalog`, `CategoryStats`
//! - **parser**: JSON array / JSON-lines catalog files
//! - **index**: loading pipeline, per-category statistics, validation
//! - **provider**: `CatalogProvider` trait and its file/static implementations
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, CatalogProvider, FileCatalogProvider};
//!
//! let provider = FileCatalogProvider::new("data/catalog.json");
//! let snapshot = provider.fetch()?;
//!
//! for category in snapshot.categories() {
//!     let stats = snapshot.get_category_stats(category).unwrap();
//!     println!("{category}: {} offerings", stats.offering_count);
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod provider;

pub use error::{CatalogError, Result};
pub use provider::{CatalogProvider, FileCatalogProvider, StaticCatalogProvider};
pub use types::{Catalog, Category, CategoryStats, Offering, OfferingIndex};
