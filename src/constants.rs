/// Source names used in logs and metric labels
pub const SHIPS_SOURCE: &str = "ships";
pub const CABINS_SOURCE: &str = "cabins";

// Default upstream routes. Deployments override these through config.toml or env.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_SHIPS_PATH: &str = "/ships";
pub const DEFAULT_CABINS_PATH: &str = "/cabins";

pub const DEFAULT_SHIPS_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CABINS_TIMEOUT_MS: u64 = 5_000;

/// Price the upstream admin writes into cabins whose price has not been set yet
pub const PLACEHOLDER_PRICE: i64 = 999_999_999;

/// Width requested from the Drive thumbnail endpoint
pub const DRIVE_THUMBNAIL_WIDTH: &str = "w1000";

pub const USER_AGENT: &str = concat!("cruise_catalog/", env!("CARGO_PKG_VERSION"));
