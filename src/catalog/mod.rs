//! Pure reconciliation of the ships and cabins collections.
//!
//! Nothing here performs I/O; the fetch orchestration lives in
//! [`crate::app::fetch_ships`].

pub mod aggregate;
pub mod enrich;
pub mod images;
pub mod normalize;
pub mod query;

pub use aggregate::{aggregate_cabins, BoatCabinStats};
pub use enrich::{enrich_ships, ParsedShip};
pub use images::rewrite_drive_url;
pub use normalize::{normalize_boat_name, slugify};
pub use query::{find_ship_by_slug, get_destinations, index_by_slug, search_ships};
