pub mod metrics;
pub mod portfolio_model;
pub mod portfolio_service;

pub use portfolio_model::*;
pub use portfolio_service::{PortfolioService, PortfolioServiceTrait};
