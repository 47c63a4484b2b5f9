//! Package construction for event service bundles.
//!
//! Given a catalog snapshot and a request (required categories, budget,
//! date), builds up to three packages holding exactly one offering per
//! category.
//!
//! ## Architecture
//! The packager processes offerings in stages:
//! 1. Filters keep offerings free on the date and priced under the ceiling
//!    (budget x 1.2), grouped per requested category
//! 2. The combination generator lazily enumerates one offering per category
//! 3. The ranker prices and scores each combination, keeping the cheapest
//!    affordable ones
//! 4. The selector names the primary packages and, when there are fewer than
//!    three, synthesizes fallbacks by single-category substitution
//!
//! ## Example Usage
//! ```ignore
//! use packager::{Packager, PackagerConfig, PackageRequest};
//!
//! let request = PackageRequest::new(["venue", "buffet"], 1000.0, "2024-06-01")?;
//! let packager = Packager::new(PackagerConfig::default());
//!
//! for package in packager.recommend(&catalog, &request)? {
//!     println!("{}: {:.2} (score {:.2})", package.name, package.total_price, package.score);
//! }
//! ```

pub mod error;
pub mod config;
pub mod request;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod eligibility;
pub mod combinations;
pub mod ranking;
pub mod selection;
pub mod packager;

// Re-export main types
pub use combinations::{Combination, Combinations};
pub use config::{FallbackStrategy, PackagerConfig};
pub use eligibility::EligibleOfferings;
pub use error::{PackagerError, Result};
pub use filter_pipeline::FilterPipeline;
pub use packager::Packager;
pub use ranking::{RankingOutcome, ScoredCombination, rank_combinations};
pub use request::PackageRequest;
pub use selection::{Package, PackageOrigin, round2};
pub use traits::Filter;
