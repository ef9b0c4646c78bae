//! Catalog fetch metrics
//!
//! Emitted through the `metrics` facade. The library installs no recorder, so
//! these are no-ops until the embedding application installs one.

pub const SOURCE_REQUESTS_SUCCESS: &str = "catalog_source_requests_success_total";
pub const SOURCE_REQUESTS_ERROR: &str = "catalog_source_requests_error_total";
pub const SOURCE_REQUEST_DURATION: &str = "catalog_source_request_duration_seconds";
pub const CABINS_DEGRADED: &str = "catalog_cabins_degraded_total";
pub const SHIPS_ENRICHED: &str = "catalog_ships_enriched_total";
pub const SHIPS_UNMATCHED: &str = "catalog_ships_unmatched_total";
pub const RECORDS_SKIPPED: &str = "catalog_records_skipped_total";

pub struct CatalogMetrics;

impl CatalogMetrics {
    pub fn record_request_success(source: &'static str, duration_secs: f64) {
        ::metrics::counter!(SOURCE_REQUESTS_SUCCESS, "source" => source).increment(1);
        ::metrics::histogram!(SOURCE_REQUEST_DURATION, "source" => source).record(duration_secs);
    }

    pub fn record_request_error(source: &'static str, error_type: &'static str) {
        ::metrics::counter!(SOURCE_REQUESTS_ERROR, "source" => source, "error" => error_type)
            .increment(1);
    }

    /// The optional cabins source failed and an empty set was used instead
    pub fn record_cabins_degraded() {
        ::metrics::counter!(CABINS_DEGRADED).increment(1);
    }

    pub fn record_enrichment(ships: usize, unmatched: usize) {
        ::metrics::counter!(SHIPS_ENRICHED).increment(ships as u64);
        ::metrics::counter!(SHIPS_UNMATCHED).increment(unmatched as u64);
    }

    /// Records dropped from a collection because they could not be decoded
    pub fn record_skipped_records(source: &'static str, skipped: usize) {
        ::metrics::counter!(RECORDS_SKIPPED, "source" => source).increment(skipped as u64);
    }
}
