//! Yahoo Finance quote provider.
//!
//! The structured half of the provider pair: returns a price/exchange
//! snapshot for an exchange-qualified symbol (e.g. "HDFCBANK.NS").
//!
//! Two fetch paths are tried in order:
//! 1. the quoteSummary API with crumb/cookie authentication, which carries
//!    both the price and the exchange identifier, then
//! 2. the `yahoo_finance_api` chart connector, a price-only fallback.

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::header;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::QuoteSnapshot;
use crate::provider::QuoteProvider;

use models::QuoteSummaryResponse;

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for the Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            }
        })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    fn provider_error(message: String) -> MarketDataError {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message,
        }
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = YAHOO_CRUMB.read().unwrap();
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| Self::provider_error("Failed to parse Yahoo cookie".to_string()))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };

        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = None;
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Fetch the latest quote using the chart connector.
    ///
    /// Price-only fallback: the chart API has no structured exchange
    /// field, and the enrichment cascade tolerates its absence.
    async fn fetch_quote_chart(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    Self::provider_error(e.to_string())
                }
            })?;

        let quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.to_string())
        })?;

        let price = Decimal::from_f64_retain(quote.close).ok_or_else(|| {
            Self::provider_error(format!("Failed to convert close price {}", quote.close))
        })?;

        Ok(QuoteSnapshot {
            price: Some(price),
            exchange: None,
        })
    }

    /// Fetch the latest quote using the quoteSummary API.
    async fn fetch_quote_summary(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("quoteSummary request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(Self::provider_error(
                "Yahoo authentication expired".to_string(),
            ));
        }
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let data: QuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::ParseFailed {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse quoteSummary response: {}", e),
            }
        })?;

        let price_data = data
            .quote_summary
            .result
            .first()
            .and_then(|r| r.price.as_ref())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let price = price_data
            .regular_market_price
            .as_ref()
            .and_then(|p| p.raw)
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let exchange = price_data
            .exchange
            .clone()
            .or_else(|| price_data.exchange_name.clone());

        Ok(QuoteSnapshot {
            price: Some(price),
            exchange,
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_quote(&self, symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        // quoteSummary first: it is the only path carrying the exchange
        // identifier alongside the price.
        match self.fetch_quote_summary(symbol).await {
            Ok(snapshot) => Ok(snapshot),
            Err(summary_err) => {
                debug!(
                    "quoteSummary failed for {} ({}), trying chart API",
                    symbol, summary_err
                );
                self.fetch_quote_chart(symbol).await
            }
        }
    }
}
