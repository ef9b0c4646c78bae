pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod metrics;
pub mod types;

pub use app::{CabinSource, ShipCatalog};
pub use catalog::{BoatCabinStats, ParsedShip};
pub use error::{CatalogError, Result};
