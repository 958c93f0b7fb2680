//! End-to-end pipeline tests: CSV source -> filter -> throttled enrichment
//! -> sector aggregation, with in-memory providers.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sectorfolio_core::{Error, PortfolioService, PortfolioServiceTrait};
use sectorfolio_market_data::{
    Fundamentals, FundamentalsProvider, MarketDataError, Pacer, QuoteProvider, QuoteSnapshot,
    SymbolMapper,
};
use sectorfolio_core::enrichment::EnrichmentService;

const SOURCE: &str = "\
Particulars,Purchase Price,Qty,CMP,P/E,Latest Earnings,NSE/BSE
Financial Sector,,,,,,
HDFC Bank,100,10,,,,
Tech Sector,,,,,,
Affle India,250,4,,,,
Tanla,500,6,,,,
";

/// Quote source that knows a fixed price for every symbol.
struct FlatQuote(Decimal);

#[async_trait]
impl QuoteProvider for FlatQuote {
    fn id(&self) -> &'static str {
        "FLAT_QUOTE"
    }
    async fn latest_quote(&self, _symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        Ok(QuoteSnapshot {
            price: Some(self.0),
            exchange: Some("NSI".to_string()),
        })
    }
}

struct DownQuote;

#[async_trait]
impl QuoteProvider for DownQuote {
    fn id(&self) -> &'static str {
        "DOWN_QUOTE"
    }
    async fn latest_quote(&self, _symbol: &str) -> Result<QuoteSnapshot, MarketDataError> {
        Err(MarketDataError::ProviderError {
            provider: self.id().to_string(),
            message: "connection refused".to_string(),
        })
    }
}

struct DownFundamentals;

#[async_trait]
impl FundamentalsProvider for DownFundamentals {
    fn id(&self) -> &'static str {
        "DOWN_FUNDAMENTALS"
    }
    async fn fundamentals(&self, _symbol: &str) -> Result<Fundamentals, MarketDataError> {
        Err(MarketDataError::ProviderError {
            provider: self.id().to_string(),
            message: "connection refused".to_string(),
        })
    }
}

fn write_source(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn portfolio_service(
    source: &tempfile::NamedTempFile,
    quote: Arc<dyn QuoteProvider>,
    fundamentals: Arc<dyn FundamentalsProvider>,
) -> PortfolioService {
    let enrichment = EnrichmentService::new(
        quote,
        fundamentals,
        Arc::new(SymbolMapper::default()),
        Arc::new(Pacer::disabled()),
        Duration::from_millis(100),
    );
    PortfolioService::new(source.path().to_path_buf(), Arc::new(enrichment))
}

#[tokio::test]
async fn full_pipeline_enriches_and_aggregates() {
    let source = write_source(SOURCE);
    let service = portfolio_service(&source, Arc::new(FlatQuote(dec!(200))), Arc::new(DownFundamentals));

    let report = service.get_enriched_portfolio().await.unwrap();

    // Sector header rows never reach the output.
    assert_eq!(report.portfolio.len(), 3);
    let names: Vec<_> = report.portfolio.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["HDFC Bank", "Affle India", "Tanla"]);

    // Every holding is priced at the flat quote.
    for holding in &report.portfolio {
        assert_eq!(holding.resolved_price, dec!(200));
        assert_eq!(
            holding.present_value,
            dec!(200) * Decimal::from(holding.quantity)
        );
        assert_eq!(holding.gain_loss, holding.present_value - holding.investment);
    }

    // Sectors in first-appearance order.
    let sector_names: Vec<_> = report.sectors.iter().map(|s| s.sector.as_str()).collect();
    assert_eq!(sector_names, vec!["Financial", "Tech"]);

    // Conservation: sector totals equal holding totals.
    let holdings_investment: Decimal = report.portfolio.iter().map(|h| h.investment).sum();
    let sectors_investment: Decimal = report.sectors.iter().map(|s| s.total_investment).sum();
    assert_eq!(sectors_investment, holdings_investment);

    // Weights sum to 1.
    let weight_sum: Decimal = report.sectors.iter().map(|s| s.weight_percentage).sum();
    assert!((weight_sum - Decimal::ONE).abs() < Decimal::new(1, 10));

    // Financial: 1000 invested of 5000 total -> 0.2.
    assert_eq!(report.sectors[0].weight_percentage, dec!(0.2));
}

#[tokio::test]
async fn provider_outage_degrades_but_never_drops_holdings() {
    let source = write_source(SOURCE);
    let service = portfolio_service(&source, Arc::new(DownQuote), Arc::new(DownFundamentals));

    let report = service.get_enriched_portfolio().await.unwrap();

    assert_eq!(report.portfolio.len(), 3);
    for holding in &report.portfolio {
        // No providers, no stored cmp: priced at purchase, flat gain/loss.
        assert_eq!(holding.resolved_price, holding.purchase_price);
        assert_eq!(holding.gain_loss, dec!(0));
        assert!(holding.pe_ratio.is_none());
        assert!(holding.earnings.is_none());
    }
}

#[tokio::test]
async fn zero_quantity_rows_are_excluded_everywhere() {
    let source = write_source(
        "\
Particulars,Purchase Price,Qty
Financial Sector,,
HDFC Bank,100,10
Defunct Co,50,0
Short Position,70,-3
",
    );
    let service = portfolio_service(&source, Arc::new(FlatQuote(dec!(120))), Arc::new(DownFundamentals));

    let report = service.get_enriched_portfolio().await.unwrap();

    assert_eq!(report.portfolio.len(), 1);
    assert_eq!(report.portfolio[0].name, "HDFC Bank");
    assert_eq!(report.sectors.len(), 1);
    assert_eq!(report.sectors[0].total_investment, dec!(1000));
}

#[tokio::test]
async fn unrecognizable_source_aborts_the_run() {
    let source = write_source("just,some,random\nrows,with,no\nheader,at,all\n");
    let service = portfolio_service(&source, Arc::new(FlatQuote(dec!(120))), Arc::new(DownFundamentals));

    let result = service.get_enriched_portfolio().await;
    assert!(matches!(result, Err(Error::Load(_))));
}

#[tokio::test]
async fn empty_source_yields_empty_report() {
    let source = write_source("Particulars,Purchase Price,Qty\n");
    let service = portfolio_service(&source, Arc::new(FlatQuote(dec!(120))), Arc::new(DownFundamentals));

    let report = service.get_enriched_portfolio().await.unwrap();
    assert!(report.portfolio.is_empty());
    assert!(report.sectors.is_empty());
}

#[tokio::test]
async fn stock_snapshot_merges_provider_fields() {
    let source = write_source(SOURCE);
    let service = portfolio_service(&source, Arc::new(FlatQuote(dec!(330))), Arc::new(DownFundamentals));

    let snapshot = service.get_stock_snapshot("HDFCBANK").await;
    assert_eq!(snapshot.symbol, "HDFCBANK");
    assert_eq!(snapshot.price, Some(dec!(330)));
    assert_eq!(snapshot.exchange.as_deref(), Some("NSI"));
    assert!(snapshot.pe_ratio.is_none());
}
