//! Filter implementations for the offering filter stage.

pub mod availability;
pub mod price_ceiling;

pub use availability::AvailabilityFilter;
pub use price_ceiling::PriceCeilingFilter;
