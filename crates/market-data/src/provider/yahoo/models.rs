//! Yahoo Finance quoteSummary API response models.
//!
//! The chart fallback path goes through the `yahoo_finance_api` connector
//! and needs no models of its own.

use serde::Deserialize;

/// Main response wrapper for the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    pub result: Vec<QuoteSummaryResult>,
    // Note: error field exists in the API but we handle errors via HTTP status/empty results
}

/// Individual result from the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    pub price: Option<PriceData>,
}

/// Price module from the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceData {
    pub regular_market_price: Option<PriceDetail>,
    /// Short exchange code (e.g. "NSI")
    pub exchange: Option<String>,
    /// Human-readable exchange name (e.g. "NSE")
    pub exchange_name: Option<String>,
}

/// Price detail with raw and formatted values
#[derive(Debug, Deserialize, Clone)]
pub struct PriceDetail {
    pub raw: Option<f64>,
    // Note: fmt field exists but we only use raw values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_price_detail() {
        let json = r#"{"raw": 150.25, "fmt": "150.25"}"#;
        let detail: PriceDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, Some(150.25));
    }

    #[test]
    fn test_deserialize_price_detail_empty_object() {
        // Yahoo returns {} for fields with no data
        let json = r#"{}"#;
        let detail: PriceDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, None);
    }

    #[test]
    fn test_deserialize_quote_summary() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "regularMarketPrice": {"raw": 1520.5, "fmt": "1,520.50"},
                        "exchange": "NSI",
                        "exchangeName": "NSE"
                    }
                }]
            }
        }"#;
        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let price = response.quote_summary.result[0].price.as_ref().unwrap();
        assert_eq!(
            price.regular_market_price.as_ref().and_then(|p| p.raw),
            Some(1520.5)
        );
        assert_eq!(price.exchange.as_deref(), Some("NSI"));
    }

    #[test]
    fn test_deserialize_empty_result() {
        let json = r#"{"quoteSummary": {"result": []}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_empty());
    }
}
