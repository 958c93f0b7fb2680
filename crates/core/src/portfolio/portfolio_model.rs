//! Response models for the portfolio-level operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::EnrichedHolding;
use crate::sectors::SectorSummary;

/// The full enriched portfolio: every surviving holding plus the sector
/// roll-up. Derived once per run and never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub portfolio: Vec<EnrichedHolding>,
    pub sectors: Vec<SectorSummary>,
}

/// Ad-hoc single-symbol lookup combining both providers.
///
/// Degraded fields are absent rather than an error: a total provider
/// outage yields a snapshot with only the symbol filled in.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,
}
