//! Shared result models for the two provider families.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of one structured quote lookup.
///
/// Both fields are optional: absence signals that the provider failed or
/// returned nothing usable, not a business fact about the instrument.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    /// Current market price, if the provider returned one.
    pub price: Option<Decimal>,

    /// Exchange identifier reported by the provider (e.g. "NSI").
    pub exchange: Option<String>,
}

impl QuoteSnapshot {
    /// The all-absent snapshot substituted when the quote source fails.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Result of one fundamentals lookup.
///
/// Scraped from an unstructured document, so every field is best-effort.
/// The price is redundant with [`QuoteSnapshot::price`] and only used as a
/// lower-priority rung in the price fallback cascade.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    /// Trailing price-to-earnings ratio.
    pub pe_ratio: Option<Decimal>,

    /// Earnings per share.
    pub earnings: Option<Decimal>,

    /// Current price as shown on the fundamentals page.
    pub price: Option<Decimal>,
}

impl Fundamentals {
    /// The all-absent result substituted when the fundamentals source fails.
    pub fn absent() -> Self {
        Self::default()
    }
}
