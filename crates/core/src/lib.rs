//! Sectorfolio Core Crate
//!
//! The enrichment-and-aggregation pipeline: turns raw portfolio holdings
//! into market-data-enriched records and per-sector summaries.
//!
//! Pipeline stages:
//!
//! 1. Load raw holdings from a tabular source file ([`holdings::loader`]).
//! 2. Filter to valid holdings ([`holdings::filter_valid`]).
//! 3. Enrich each holding with live provider data under independent
//!    failure domains ([`enrichment::EnrichmentService`]), paced between
//!    holdings to respect provider rate limits.
//! 4. Fold the enriched sequence into sector summaries
//!    ([`sectors::aggregate`]).
//!
//! Only a loader failure aborts a run. Provider failures degrade the
//! affected holding to its best available fallback price and never drop it.

pub mod enrichment;
pub mod errors;
pub mod holdings;
pub mod portfolio;
pub mod sectors;

pub use errors::{Error, LoadError, Result};
pub use holdings::{filter_valid, EnrichedHolding, PriceSource, RawHolding};
pub use portfolio::{PortfolioReport, PortfolioService, PortfolioServiceTrait, StockSnapshot};
pub use sectors::{aggregate, SectorSummary};
