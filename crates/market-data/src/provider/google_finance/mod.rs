//! Google Finance fundamentals provider.
//!
//! The unstructured half of the provider pair: extracts valuation metrics
//! (P/E ratio, EPS, current price) from the Google Finance quote page HTML.
//! The page is not an API, so extraction is best-effort and every field of
//! the result is optional even on a successful fetch.

use async_trait::async_trait;
use reqwest::header;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::Fundamentals;
use crate::provider::FundamentalsProvider;

const PROVIDER_ID: &str = "GOOGLE_FINANCE";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Google Finance fundamentals provider.
pub struct GoogleFinanceProvider {
    client: reqwest::Client,
}

impl GoogleFinanceProvider {
    /// Create a new Google Finance provider.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Strip a Yahoo exchange suffix (".NS"/".BO") if the caller passed an
    /// exchange-qualified symbol; Google Finance wants the bare ticker.
    fn clean_symbol(symbol: &str) -> &str {
        let upper = symbol.to_ascii_uppercase();
        if let Some(stripped) = upper
            .strip_suffix(".NS")
            .or_else(|| upper.strip_suffix(".BO"))
        {
            &symbol[..stripped.len()]
        } else {
            symbol
        }
    }
}

impl Default for GoogleFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FundamentalsProvider for GoogleFinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, MarketDataError> {
        let clean = Self::clean_symbol(symbol);
        let url = format!("https://www.google.com/finance/quote/{}:NSE", clean);

        debug!("Fetching Google Finance page for {} from {}", clean, url);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Unexpected status {} for {}", response.status(), clean),
            });
        }

        let html = response.text().await?;
        let fundamentals = parse_fundamentals(&html);

        debug!(
            "Google Finance result for {}: price={:?} pe={:?} eps={:?}",
            clean, fundamentals.price, fundamentals.pe_ratio, fundamentals.earnings
        );

        Ok(fundamentals)
    }
}

/// Extract fundamentals from a Google Finance quote page.
///
/// Three independent passes, mirroring where the page puts each figure:
/// the headline price div, the key-stats label/value rows, and the
/// financials table (for EPS). A pass that finds nothing leaves its field
/// absent; the page layout changing is not an error here.
fn parse_fundamentals(html: &str) -> Fundamentals {
    let doc = Html::parse_document(html);

    let sel_price = Selector::parse("div.YMlKec.fxKbKc").unwrap();
    let sel_stat_row = Selector::parse("div.gyFHrc").unwrap();
    let sel_stat_label = Selector::parse("div.mfs7Fc").unwrap();
    let sel_stat_value = Selector::parse("div.P6K39c").unwrap();
    let sel_table_row = Selector::parse("table tr").unwrap();
    let sel_table_cell = Selector::parse("td").unwrap();

    // Headline price
    let price = doc
        .select(&sel_price)
        .next()
        .and_then(|el| parse_money(&element_text(&el)));

    // Key-stats rows: label div next to value div
    let mut pe_ratio = None;
    let mut earnings = None;
    for row in doc.select(&sel_stat_row) {
        let label = match row.select(&sel_stat_label).next() {
            Some(el) => element_text(&el).to_lowercase(),
            None => continue,
        };
        let value = match row.select(&sel_stat_value).next() {
            Some(el) => element_text(&el),
            None => continue,
        };

        if label.contains("p/e") || label.contains("price/earnings") {
            pe_ratio = pe_ratio.or_else(|| parse_money(&value).filter(|v| *v > Decimal::ZERO));
        } else if label.contains("earnings per share") || label.contains("eps") {
            earnings = earnings.or_else(|| parse_money(&value).filter(|v| *v > Decimal::ZERO));
        }
    }

    // Financials table fallback for EPS
    if earnings.is_none() {
        for row in doc.select(&sel_table_row) {
            let row_text = element_text(&row).to_lowercase();
            if !row_text.contains("earnings per share") && !row_text.contains("eps") {
                continue;
            }
            earnings = row
                .select(&sel_table_cell)
                .filter_map(|cell| parse_money(&element_text(&cell)))
                .find(|v| *v > Decimal::ZERO);
            if earnings.is_some() {
                break;
            }
        }
    }

    Fundamentals {
        pe_ratio,
        earnings,
        price,
    }
}

/// Collected text of an element, whitespace-trimmed.
fn element_text(el: &scraper::ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a displayed money/ratio figure ("₹1,520.50", "20.51") to a Decimal.
///
/// Strips currency symbols and thousands separators; anything that does not
/// leave a plain decimal number behind parses to None.
fn parse_money(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}
