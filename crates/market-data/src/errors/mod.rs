//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Provider failures are a normal operating condition for this crate: the
/// enrichment pipeline catches every variant and substitutes an all-absent
/// result for the failing provider, so none of these abort a pipeline run.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider exceeded the bounded wait.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider responded but the payload could not be interpreted.
    /// For the fundamentals source this usually means the page markup changed.
    #[error("Parse failed: {provider} - {message}")]
    ParseFailed {
        /// The provider whose response failed to parse
        provider: String,
        /// Description of the parse failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// The provider this error originated from, when known.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::RateLimited { provider }
            | Self::Timeout { provider }
            | Self::ProviderError { provider, .. }
            | Self::ParseFailed { provider, .. } => Some(provider),
            Self::SymbolNotFound(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: YAHOO");

        let error = MarketDataError::ParseFailed {
            provider: "GOOGLE_FINANCE".to_string(),
            message: "no price element".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Parse failed: GOOGLE_FINANCE - no price element"
        );
    }

    #[test]
    fn test_provider_attribution() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "internal error".to_string(),
        };
        assert_eq!(error.provider(), Some("YAHOO"));

        let error = MarketDataError::SymbolNotFound("HDFCBANK".to_string());
        assert_eq!(error.provider(), None);
    }
}
