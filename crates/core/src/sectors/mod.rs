//! Sector-level aggregation of enriched holdings.

mod sector_aggregator;
mod sector_model;

pub use sector_aggregator::aggregate;
pub use sector_model::SectorSummary;
