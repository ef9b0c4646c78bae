pub mod fetch_ships;
pub mod ports;

pub use fetch_ships::{CabinSource, ShipCatalog};
