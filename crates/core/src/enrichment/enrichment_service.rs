//! Enrichment service: orchestrates both providers per holding and runs
//! the throttled batch loop.
//!
//! Failure model: each provider call has its own bounded wait and error
//! boundary, so one provider's outage never suppresses the other's result
//! and no provider failure ever drops a holding. The worst case for a
//! holding is a record priced from its own stored data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use sectorfolio_market_data::{
    Fundamentals, FundamentalsProvider, Pacer, QuoteProvider, QuoteSnapshot, SymbolMapper,
};

use crate::enrichment::resolve_price;
use crate::holdings::{EnrichedHolding, RawHolding};

/// Enrichment operations consumed by the portfolio service.
#[async_trait]
pub trait EnrichmentServiceTrait: Send + Sync {
    /// Enrich one holding. Infallible by contract: all provider failure is
    /// absorbed and converted to a degraded-but-valid record.
    async fn enrich_holding(&self, holding: &RawHolding) -> EnrichedHolding;

    /// Enrich a batch sequentially, preserving input order, with the
    /// pacing gate between consecutive holdings.
    async fn enrich_all(&self, holdings: &[RawHolding]) -> Vec<EnrichedHolding>;

    /// Ad-hoc lookup of one symbol against both providers, with the same
    /// per-provider guards as holding enrichment.
    async fn lookup_symbol(&self, symbol: &str) -> (QuoteSnapshot, Fundamentals);
}

/// Provider-backed enrichment service.
pub struct EnrichmentService {
    quote_provider: Arc<dyn QuoteProvider>,
    fundamentals_provider: Arc<dyn FundamentalsProvider>,
    symbol_mapper: Arc<SymbolMapper>,
    pacer: Arc<Pacer>,
    provider_timeout: Duration,
}

impl EnrichmentService {
    pub fn new(
        quote_provider: Arc<dyn QuoteProvider>,
        fundamentals_provider: Arc<dyn FundamentalsProvider>,
        symbol_mapper: Arc<SymbolMapper>,
        pacer: Arc<Pacer>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            quote_provider,
            fundamentals_provider,
            symbol_mapper,
            pacer,
            provider_timeout,
        }
    }

    /// Quote call with its own failure domain: errors and timeouts both
    /// collapse to the all-absent snapshot.
    async fn guarded_quote(&self, key: &str) -> QuoteSnapshot {
        let call = self.quote_provider.latest_quote(key);
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                warn!(
                    "Quote source {} failed for {}: {}",
                    self.quote_provider.id(),
                    key,
                    e
                );
                QuoteSnapshot::absent()
            }
            Err(_) => {
                warn!(
                    "Quote source {} timed out for {} after {:?}",
                    self.quote_provider.id(),
                    key,
                    self.provider_timeout
                );
                QuoteSnapshot::absent()
            }
        }
    }

    /// Fundamentals call with its own failure domain.
    async fn guarded_fundamentals(&self, symbol: &str) -> Fundamentals {
        let call = self.fundamentals_provider.fundamentals(symbol);
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(fundamentals)) => fundamentals,
            Ok(Err(e)) => {
                warn!(
                    "Fundamentals source {} failed for {}: {}",
                    self.fundamentals_provider.id(),
                    symbol,
                    e
                );
                Fundamentals::absent()
            }
            Err(_) => {
                warn!(
                    "Fundamentals source {} timed out for {} after {:?}",
                    self.fundamentals_provider.id(),
                    symbol,
                    self.provider_timeout
                );
                Fundamentals::absent()
            }
        }
    }

    /// Assemble the enriched record. Checked arithmetic: a None here is
    /// routed to the fallback record by the caller.
    fn build_enriched(
        &self,
        holding: &RawHolding,
        symbol: &str,
        quote: &QuoteSnapshot,
        fundamentals: &Fundamentals,
    ) -> Option<EnrichedHolding> {
        let (resolved_price, price_source) = resolve_price(
            quote.price,
            fundamentals.price,
            holding.cmp,
            holding.purchase_price,
        );

        let present_value = resolved_price.checked_mul(Decimal::from(holding.quantity))?;
        let gain_loss = present_value.checked_sub(holding.investment)?;

        // Exchange precedence: quote result > stored code > symbol.
        let resolved_exchange = quote
            .exchange
            .clone()
            .or_else(|| holding.exchange.clone())
            .unwrap_or_else(|| symbol.to_string());

        Some(EnrichedHolding {
            name: holding.name.clone(),
            purchase_price: holding.purchase_price,
            quantity: holding.quantity,
            investment: holding.investment,
            sector: holding.sector.clone(),
            resolved_price,
            present_value,
            gain_loss,
            pe_ratio: fundamentals.pe_ratio,
            earnings: fundamentals.earnings,
            resolved_exchange,
            price_source,
        })
    }

    /// Last-ditch record built from the holding's own stored data, used
    /// when assembly itself fails. Saturating arithmetic cannot fail.
    fn fallback_enriched(&self, holding: &RawHolding, symbol: &str) -> EnrichedHolding {
        let (resolved_price, price_source) =
            resolve_price(None, None, holding.cmp, holding.purchase_price);
        let present_value = resolved_price.saturating_mul(Decimal::from(holding.quantity));
        let gain_loss = present_value.saturating_sub(holding.investment);

        EnrichedHolding {
            name: holding.name.clone(),
            purchase_price: holding.purchase_price,
            quantity: holding.quantity,
            investment: holding.investment,
            sector: holding.sector.clone(),
            resolved_price,
            present_value,
            gain_loss,
            pe_ratio: None,
            earnings: None,
            resolved_exchange: holding
                .exchange
                .clone()
                .unwrap_or_else(|| symbol.to_string()),
            price_source,
        }
    }
}

#[async_trait]
impl EnrichmentServiceTrait for EnrichmentService {
    async fn enrich_holding(&self, holding: &RawHolding) -> EnrichedHolding {
        let symbol = self.symbol_mapper.normalize(&holding.name);

        // Quote source wants an exchange-qualified code; fall back to the
        // NSE-suffixed symbol when the source file carried none.
        let quote_key = holding
            .exchange
            .clone()
            .unwrap_or_else(|| format!("{}.NS", symbol));

        debug!("Enriching {} (symbol {})", holding.name, symbol);

        // Both calls in flight before either is awaited; each owns its
        // failure domain.
        let (quote, fundamentals) = tokio::join!(
            self.guarded_quote(&quote_key),
            self.guarded_fundamentals(&symbol)
        );

        let enriched = match self.build_enriched(holding, &symbol, &quote, &fundamentals) {
            Some(enriched) => enriched,
            None => {
                warn!(
                    "Enrichment arithmetic failed for {}, using stored data",
                    holding.name
                );
                self.fallback_enriched(holding, &symbol)
            }
        };

        info!(
            "{}: quote={:?} fundamentals_price={:?} pe={:?} -> {} via {:?}",
            symbol,
            quote.price,
            fundamentals.price,
            enriched.pe_ratio,
            enriched.resolved_price,
            enriched.price_source
        );

        enriched
    }

    async fn enrich_all(&self, holdings: &[RawHolding]) -> Vec<EnrichedHolding> {
        let mut enriched = Vec::with_capacity(holdings.len());
        for holding in holdings {
            self.pacer.pause().await;
            enriched.push(self.enrich_holding(holding).await);
        }
        enriched
    }

    async fn lookup_symbol(&self, symbol: &str) -> (QuoteSnapshot, Fundamentals) {
        tokio::join!(
            self.guarded_quote(symbol),
            self.guarded_fundamentals(symbol)
        )
    }
}
