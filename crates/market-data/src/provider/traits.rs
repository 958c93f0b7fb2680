//! Provider trait definitions.
//!
//! The enrichment pipeline talks to both provider families through these
//! traits, so tests can substitute in-memory fakes for the network-backed
//! implementations.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Fundamentals, QuoteSnapshot};

/// Structured quote source.
///
/// Returns a price/exchange pair for a provider-keyed symbol. Implementors
/// are expected to fail loudly with a [`MarketDataError`]; the caller owns
/// the decision to degrade to an absent result.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error context.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol or exchange-qualified code
    /// (e.g. "HDFCBANK.NS").
    async fn latest_quote(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError>;
}

/// Unstructured fundamentals source.
///
/// Extracts valuation metrics (P/E, EPS, price) for a bare symbol from a
/// document not designed to be machine-read, so partial results are normal:
/// a successful call may still carry absent fields.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error context.
    fn id(&self) -> &'static str;

    /// Fetch valuation fundamentals for a bare symbol (e.g. "HDFCBANK").
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, MarketDataError>;
}
