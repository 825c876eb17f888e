//! CSV storage implementation for closed positions.

mod model;
mod repository;

pub use model::ClosedPositionRow;
pub use repository::ClosedPositionRepository;
