//! Application state wiring and tracing setup.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use sectorfolio_core::enrichment::EnrichmentService;
use sectorfolio_core::{PortfolioService, PortfolioServiceTrait};
use sectorfolio_market_data::{GoogleFinanceProvider, Pacer, SymbolMapper, YahooQuoteProvider};

use crate::config::Config;

pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SECTORFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let quote_provider = Arc::new(YahooQuoteProvider::new()?);
    let fundamentals_provider = Arc::new(GoogleFinanceProvider::new());

    let enrichment_service = Arc::new(EnrichmentService::new(
        quote_provider,
        fundamentals_provider,
        Arc::new(SymbolMapper::default()),
        Arc::new(Pacer::new(Duration::from_millis(config.pacing_ms))),
        Duration::from_millis(config.provider_timeout_ms),
    ));

    let portfolio_service = Arc::new(PortfolioService::new(
        config.portfolio_file.clone(),
        enrichment_service,
    ));

    tracing::info!(
        "Holdings source: {} (pacing {}ms, provider timeout {}ms)",
        config.portfolio_file.display(),
        config.pacing_ms,
        config.provider_timeout_ms
    );

    Ok(Arc::new(AppState { portfolio_service }))
}
