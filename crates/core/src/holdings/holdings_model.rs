//! Holding models for the enrichment pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Section header labels that occasionally survive loading as ordinary
/// rows. Rows named exactly like one of these are never holdings.
pub const SECTOR_HEADER_LABELS: &[&str] = &[
    "Financial Sector",
    "Tech Sector",
    "Consumer",
    "Power",
    "Others",
    "Pipe Sector",
];

/// One raw portfolio line item as produced by the loader.
///
/// Immutable once loaded; the pipeline derives [`EnrichedHolding`] records
/// from these without modifying them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    /// Free-text company display name from the source file.
    pub name: String,

    /// Purchase price per unit.
    pub purchase_price: Decimal,

    /// Number of units held. May be zero or negative in the source file;
    /// such rows are filtered out before enrichment.
    pub quantity: i64,

    /// Invested amount: purchase price times quantity, fixed at load time.
    pub investment: Decimal,

    /// Sector grouping label, "Unknown" when the source file gave none.
    pub sector: String,

    /// Statically-known current price carried from the source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmp: Option<Decimal>,

    /// Static P/E ratio carried from the source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    /// Static earnings figure carried from the source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,

    /// Exchange code carried from the source file (e.g. "HDFCBANK.NS").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl RawHolding {
    /// Whether this row is a real holding the pipeline should process:
    /// non-blank name, not a stray section header, positive quantity.
    pub fn is_valid(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && !SECTOR_HEADER_LABELS.contains(&name) && self.quantity > 0
    }
}

/// The sole gate between loader output and the pipeline. Idempotent:
/// filtering already-filtered holdings changes nothing.
pub fn filter_valid(holdings: Vec<RawHolding>) -> Vec<RawHolding> {
    holdings.into_iter().filter(RawHolding::is_valid).collect()
}

/// Which rung of the price fallback cascade produced the resolved price.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceSource {
    /// Live structured quote from the quote source.
    Quote,
    /// Price scraped by the fundamentals source.
    Fundamentals,
    /// Statically-known price carried on the holding record.
    Carried,
    /// Purchase price, the always-present last resort.
    Purchase,
}

/// A holding after enrichment with live market data.
///
/// `resolved_price` is never absent: the fallback cascade terminates at the
/// purchase price, so even a total provider outage yields a priced record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub name: String,
    pub purchase_price: Decimal,
    pub quantity: i64,
    pub investment: Decimal,
    pub sector: String,

    /// Current market price chosen by the fallback cascade.
    pub resolved_price: Decimal,

    /// `resolved_price * quantity`.
    pub present_value: Decimal,

    /// `present_value - investment`.
    pub gain_loss: Decimal,

    /// P/E ratio from the fundamentals source, absent when that provider
    /// failed or returned nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    /// Earnings per share from the fundamentals source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,

    /// Exchange identifier: quote source result, else the stored exchange
    /// code, else the normalized symbol.
    pub resolved_exchange: String,

    /// Which cascade rung produced `resolved_price`. Diagnostic.
    pub price_source: PriceSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(name: &str, quantity: i64) -> RawHolding {
        RawHolding {
            name: name.to_string(),
            purchase_price: dec!(100),
            quantity,
            investment: dec!(100) * Decimal::from(quantity),
            sector: "Tech".to_string(),
            cmp: None,
            pe_ratio: None,
            earnings: None,
            exchange: None,
        }
    }

    #[test]
    fn test_positive_quantity_holding_is_valid() {
        assert!(holding("HDFC Bank", 10).is_valid());
    }

    #[test]
    fn test_zero_or_negative_quantity_is_invalid() {
        assert!(!holding("HDFC Bank", 0).is_valid());
        assert!(!holding("HDFC Bank", -5).is_valid());
    }

    #[test]
    fn test_blank_name_is_invalid() {
        assert!(!holding("", 10).is_valid());
        assert!(!holding("   ", 10).is_valid());
    }

    #[test]
    fn test_sector_header_label_is_invalid() {
        assert!(!holding("Financial Sector", 10).is_valid());
        assert!(!holding("Others", 10).is_valid());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let holdings = vec![
            holding("HDFC Bank", 10),
            holding("Financial Sector", 0),
            holding("Dmart", 5),
            holding("", 3),
        ];

        let once = filter_valid(holdings);
        let names: Vec<_> = once.iter().map(|h| h.name.clone()).collect();
        let twice = filter_valid(once);

        assert_eq!(names, vec!["HDFC Bank", "Dmart"]);
        assert_eq!(
            twice.iter().map(|h| h.name.clone()).collect::<Vec<_>>(),
            names
        );
    }

    #[test]
    fn test_enriched_holding_serializes_camel_case() {
        let enriched = EnrichedHolding {
            name: "HDFC Bank".to_string(),
            purchase_price: dec!(100),
            quantity: 10,
            investment: dec!(1000),
            sector: "Financial".to_string(),
            resolved_price: dec!(150),
            present_value: dec!(1500),
            gain_loss: dec!(500),
            pe_ratio: Some(dec!(20)),
            earnings: None,
            resolved_exchange: "NSI".to_string(),
            price_source: PriceSource::Quote,
        };
        let json = serde_json::to_value(&enriched).unwrap();
        assert!(json.get("purchasePrice").is_some());
        assert!(json.get("presentValue").is_some());
        assert!(json.get("gainLoss").is_some());
        assert!(json.get("resolvedExchange").is_some());
        assert_eq!(json["priceSource"], "quote");
        // Absent optionals are omitted, not serialized as null.
        assert!(json.get("earnings").is_none());
    }
}
