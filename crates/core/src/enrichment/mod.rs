//! Per-holding enrichment: provider orchestration, failure isolation and
//! the price fallback cascade.

mod enrichment_service;
mod price_resolver;

pub use enrichment_service::{EnrichmentService, EnrichmentServiceTrait};
pub use price_resolver::resolve_price;
