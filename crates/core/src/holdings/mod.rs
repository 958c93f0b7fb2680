//! Holding records and the loader that produces them.

pub mod loader;

mod holdings_model;

pub use holdings_model::{
    filter_valid, EnrichedHolding, PriceSource, RawHolding, SECTOR_HEADER_LABELS,
};
