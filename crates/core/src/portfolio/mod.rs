//! Portfolio-level orchestration: the produced interface of the pipeline.

mod portfolio_model;
mod portfolio_service;

pub use portfolio_model::{PortfolioReport, StockSnapshot};
pub use portfolio_service::{PortfolioService, PortfolioServiceTrait};
