use std::sync::Arc;

use crate::config::{Config, PriceSource};
use tickerbook_core::{
    portfolio::{PortfolioService, PortfolioServiceTrait},
    positions::{ClosedPositionService, ClosedPositionServiceTrait},
    purchases::{PurchaseService, PurchaseServiceTrait},
    quotes::{PriceService, PriceServiceTrait},
};
use tickerbook_market_data::{MockPriceProvider, PriceProvider, SpreadsheetPriceProvider};
use tickerbook_storage_csv::{
    db::{self, spawn_writer},
    ClosedPositionRepository, PurchaseRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub purchase_service: Arc<dyn PurchaseServiceTrait + Send + Sync>,
    pub closed_position_service: Arc<dyn ClosedPositionServiceTrait + Send + Sync>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait + Send + Sync>,
    pub price_service: Arc<dyn PriceServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_price_provider(config: &Config) -> anyhow::Result<Arc<dyn PriceProvider>> {
    let provider: Arc<dyn PriceProvider> = match &config.price_source {
        PriceSource::Mock => Arc::new(MockPriceProvider::with_default_universe()?),
        PriceSource::Spreadsheet { url } => Arc::new(SpreadsheetPriceProvider::new(
            url.clone(),
            config.sheet_timeout,
        )),
    };
    tracing::info!("Price source: {}", provider.id());
    Ok(provider)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let paths = Arc::new(db::init(&config.data_dir)?);
    tracing::info!("Data directory in use: {}", paths.data_dir.display());
    let writer = spawn_writer((*paths).clone());

    let purchase_repository = Arc::new(PurchaseRepository::new(paths.clone(), writer.clone()));
    let closed_position_repository =
        Arc::new(ClosedPositionRepository::new(paths.clone(), writer.clone()));

    let price_service = Arc::new(PriceService::new(
        build_price_provider(config)?,
        config.price_refresh,
    ));

    let purchase_service = Arc::new(PurchaseService::new(
        purchase_repository.clone(),
        price_service.clone(),
    ));
    let closed_position_service = Arc::new(ClosedPositionService::new(
        purchase_repository.clone(),
        closed_position_repository,
        config.cagr_start,
    ));
    let portfolio_service = Arc::new(PortfolioService::new(
        purchase_repository,
        price_service.clone(),
    ));

    Ok(Arc::new(AppState {
        purchase_service,
        closed_position_service,
        portfolio_service,
        price_service,
    }))
}
