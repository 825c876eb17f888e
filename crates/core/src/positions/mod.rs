//! Positions module - closed (sold) positions, sale settlement and the realized summary.

mod positions_model;
mod positions_service;
mod positions_traits;


pub use positions_model::{ClosedPosition, PositionsSummary, SaleRequest};
pub use positions_service::ClosedPositionService;
pub use positions_traits::{ClosedPositionRepositoryTrait, ClosedPositionServiceTrait};
