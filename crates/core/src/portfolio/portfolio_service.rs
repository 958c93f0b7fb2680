//! Portfolio service: load, filter, enrich, aggregate.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::enrichment::EnrichmentServiceTrait;
use crate::errors::Result;
use crate::holdings::{filter_valid, loader};
use crate::portfolio::{PortfolioReport, StockSnapshot};
use crate::sectors::aggregate;

/// Portfolio operations consumed by the HTTP surface.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Run the whole pipeline once: load the source file, enrich every
    /// valid holding, aggregate sectors. Fails only when the holdings
    /// source itself cannot be loaded.
    async fn get_enriched_portfolio(&self) -> Result<PortfolioReport>;

    /// Look one symbol up against both providers. Infallible; degraded
    /// fields come back absent.
    async fn get_stock_snapshot(&self, symbol: &str) -> StockSnapshot;
}

/// File-backed portfolio service.
pub struct PortfolioService {
    source_path: PathBuf,
    enrichment_service: Arc<dyn EnrichmentServiceTrait>,
}

impl PortfolioService {
    pub fn new(source_path: PathBuf, enrichment_service: Arc<dyn EnrichmentServiceTrait>) -> Self {
        Self {
            source_path,
            enrichment_service,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_enriched_portfolio(&self) -> Result<PortfolioReport> {
        let raw = loader::load_from_path(&self.source_path)?;
        let total_rows = raw.len();

        let valid = filter_valid(raw);
        debug!(
            "Processing {} valid holdings out of {} loaded rows",
            valid.len(),
            total_rows
        );

        let portfolio = self.enrichment_service.enrich_all(&valid).await;
        let (sectors, grand_total) = aggregate(&portfolio);

        debug!(
            "Enriched {} holdings across {} sectors (grand total investment {})",
            portfolio.len(),
            sectors.len(),
            grand_total
        );

        Ok(PortfolioReport { portfolio, sectors })
    }

    async fn get_stock_snapshot(&self, symbol: &str) -> StockSnapshot {
        let (quote, fundamentals) = self.enrichment_service.lookup_symbol(symbol).await;

        StockSnapshot {
            symbol: symbol.to_string(),
            price: quote.price.or(fundamentals.price),
            exchange: quote.exchange,
            pe_ratio: fundamentals.pe_ratio,
            earnings: fundamentals.earnings,
        }
    }
}
