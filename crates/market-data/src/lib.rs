//! Sectorfolio Market Data Crate
//!
//! This crate provides the provider-facing half of the enrichment pipeline:
//! fetching live market data from external sources that are allowed to fail.
//!
//! # Overview
//!
//! The market data crate supports:
//! - A structured quote source (Yahoo Finance) returning price/exchange pairs
//! - An unstructured fundamentals source (Google Finance page scraping)
//!   returning valuation metrics
//! - Display-name to provider-symbol normalization
//! - Request pacing between consecutive provider calls
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Display Name   | --> |   SymbolMapper   |  (exact-match table)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Providers     |  (Yahoo, Google Finance)
//!                          +------------------+
//!                             |            |
//!                             v            v
//!                   +---------------+  +---------------+
//!                   | QuoteSnapshot |  | Fundamentals  |
//!                   +---------------+  +---------------+
//! ```
//!
//! Every provider call may fail; callers are expected to catch
//! [`MarketDataError`] and degrade to an absent result rather than abort.
//!
//! # Core Types
//!
//! - [`QuoteSnapshot`] - Optional price and exchange from the quote source
//! - [`Fundamentals`] - Optional P/E, EPS and price from the fundamentals source
//! - [`SymbolMapper`] - Injected display-name to ticker mapping
//! - [`Pacer`] - Minimum-interval gate between provider call rounds

pub mod errors;
pub mod models;
pub mod provider;
pub mod symbols;
pub mod throttle;

// Re-export all public types from models
pub use models::{Fundamentals, QuoteSnapshot};

// Re-export provider types
pub use provider::google_finance::GoogleFinanceProvider;
pub use provider::yahoo::YahooQuoteProvider;
pub use provider::{FundamentalsProvider, QuoteProvider};

// Re-export symbol mapping and pacing
pub use errors::MarketDataError;
pub use symbols::SymbolMapper;
pub use throttle::Pacer;
