//! Pure fold from enriched holdings to sector summaries.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::holdings::EnrichedHolding;
use crate::sectors::SectorSummary;

/// Aggregate enriched holdings into per-sector totals and weights.
///
/// Sectors appear in insertion order of first appearance, not sorted.
/// Weights are computed against the grand total investment, which is also
/// returned; with a zero grand total every weight stays zero.
pub fn aggregate(holdings: &[EnrichedHolding]) -> (Vec<SectorSummary>, Decimal) {
    let grand_total: Decimal = holdings.iter().map(|h| h.investment).sum();

    let mut index_by_sector: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<SectorSummary> = Vec::new();

    for holding in holdings {
        let index = *index_by_sector
            .entry(holding.sector.as_str())
            .or_insert_with(|| {
                summaries.push(SectorSummary::empty(&holding.sector));
                summaries.len() - 1
            });

        let summary = &mut summaries[index];
        summary.total_investment += holding.investment;
        summary.total_present_value += holding.present_value;
        summary.total_gain_loss += holding.gain_loss;
    }

    if grand_total > Decimal::ZERO {
        for summary in &mut summaries {
            summary.weight_percentage = summary.total_investment / grand_total;
        }
    }

    (summaries, grand_total)
}
