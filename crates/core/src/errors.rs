//! Core error types for the enrichment pipeline.
//!
//! The taxonomy mirrors the propagation policy: a [`LoadError`] is fatal to
//! the whole run, while market data failures are recovered inside the
//! enricher and only appear here for completeness.

use sectorfolio_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The holdings source could not be loaded. Fatal to the run; this is
    /// the only failure that propagates to the caller.
    #[error("Failed to load holdings: {0}")]
    Load(#[from] LoadError),

    /// A market data failure that escaped the per-provider boundaries.
    /// The enricher converts these to absent results, so reaching this
    /// variant means a caller bypassed the enricher.
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised while parsing the holdings source file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No row containing the expected header column was found, so the
    /// file's schema is unrecognizable.
    #[error("No header row containing '{0}' found in holdings source")]
    MissingHeader(String),

    #[error("Failed to read holdings source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse holdings source: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let error = LoadError::MissingHeader("Particulars".to_string());
        assert_eq!(
            format!("{}", error),
            "No header row containing 'Particulars' found in holdings source"
        );
    }

    #[test]
    fn test_load_error_converts_to_pipeline_error() {
        let error: Error = LoadError::MissingHeader("Particulars".to_string()).into();
        assert!(matches!(error, Error::Load(_)));
    }
}
