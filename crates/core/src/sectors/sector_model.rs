//! Sector summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated totals for one sector.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    /// Sector grouping label.
    pub sector: String,

    /// Sum of member holdings' invested amounts.
    pub total_investment: Decimal,

    /// Sum of member holdings' present values.
    pub total_present_value: Decimal,

    /// Sum of member holdings' gain/loss figures.
    pub total_gain_loss: Decimal,

    /// This sector's share of total invested capital, as a fraction in
    /// [0, 1]. Zero when the grand total investment is zero.
    pub weight_percentage: Decimal,
}

impl SectorSummary {
    /// An all-zero summary for a sector, ready to accumulate into.
    pub fn empty(sector: &str) -> Self {
        Self {
            sector: sector.to_string(),
            total_investment: Decimal::ZERO,
            total_present_value: Decimal::ZERO,
            total_gain_loss: Decimal::ZERO,
            weight_percentage: Decimal::ZERO,
        }
    }
}
