//! Data directory layout, table file I/O and the writer actor.

mod table;
mod write_actor;

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::IntoCore;
use tickerbook_core::Result;

pub use table::{read_table, write_table, CsvTable};
pub use write_actor::{spawn_writer, WriteHandle};

pub const PURCHASES_FILE: &str = "purchases.csv";
pub const CLOSED_POSITIONS_FILE: &str = "closed_positions.csv";

/// Locations of the ledger files inside a data directory.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    pub purchases: PathBuf,
    pub closed_positions: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            purchases: data_dir.join(PURCHASES_FILE),
            closed_positions: data_dir.join(CLOSED_POSITIONS_FILE),
            data_dir,
        }
    }
}

/// Creates the data directory and any missing ledger file (header only).
///
/// Existing files are left untouched.
pub fn init(data_dir: impl AsRef<Path>) -> Result<StorePaths> {
    let paths = StorePaths::new(data_dir);
    fs::create_dir_all(&paths.data_dir).into_core()?;

    if !paths.purchases.exists() {
        write_table::<crate::purchases::PurchaseRow>(&paths.purchases, &[])?;
        info!("Created {}", paths.purchases.display());
    }
    if !paths.closed_positions.exists() {
        write_table::<crate::positions::ClosedPositionRow>(&paths.closed_positions, &[])?;
        info!("Created {}", paths.closed_positions.display());
    }

    Ok(paths)
}
