use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::catalog::{aggregate_cabins, enrich_ships, find_ship_by_slug, get_destinations, search_ships, ParsedShip};
use crate::config::{ApiConfig, Config};
use crate::constants::{CABINS_SOURCE, SHIPS_SOURCE};
use crate::error::{CatalogError, Result};
use crate::infra::http_client::ReqwestHttp;
use crate::metrics::CatalogMetrics;
use crate::types::{ApiEnvelope, Cabin, Ship};

/// Outcome of the optional cabins request. Failures never cross the join as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CabinSource {
    Loaded(Vec<Cabin>),
    /// The source failed; ships are enriched as if it returned no cabins
    Degraded { reason: String },
}

impl CabinSource {
    pub fn is_degraded(&self) -> bool {
        matches!(self, CabinSource::Degraded { .. })
    }

    pub fn into_cabins(self) -> Vec<Cabin> {
        match self {
            CabinSource::Loaded(cabins) => cabins,
            CabinSource::Degraded { .. } => Vec::new(),
        }
    }
}

/// Fetches ships and cabins and reconciles them into enriched ships.
///
/// Every call fetches both collections again; nothing is cached between calls.
pub struct ShipCatalog {
    http: Arc<dyn HttpClientPort>,
    api: ApiConfig,
    placeholder_price: i64,
}

impl ShipCatalog {
    pub fn new(http: Arc<dyn HttpClientPort>, config: &Config) -> Self {
        Self {
            http,
            api: config.api.clone(),
            placeholder_price: config.catalog.placeholder_price,
        }
    }

    /// Catalog over a reqwest transport. The client timeout is the larger per-source bound;
    /// each source is still cut off at its own timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport_timeout = config.api.ships_timeout().max(config.api.cabins_timeout());
        let http = ReqwestHttp::new(transport_timeout)?;
        Ok(Self::new(Arc::new(http), config))
    }

    /// Enriched ships in the order the ships source returned them.
    ///
    /// Fails only when the ships source fails. A failing cabins source yields
    /// ships with zeroed cabin statistics.
    #[instrument(skip(self))]
    pub async fn fetch_ships(&self) -> Result<Vec<ParsedShip>> {
        let (ships, cabins) = tokio::join!(self.fetch_required_ships(), self.fetch_optional_cabins());
        let ships = ships?;

        if let CabinSource::Degraded { reason } = &cabins {
            warn!(reason = %reason, "Cabins unavailable, continuing without cabin data");
            CatalogMetrics::record_cabins_degraded();
        }

        let stats = aggregate_cabins(&cabins.into_cabins(), self.placeholder_price);
        let parsed = enrich_ships(ships, &stats);

        let unmatched = parsed.iter().filter(|ship| ship.cabin_count == 0).count();
        CatalogMetrics::record_enrichment(parsed.len(), unmatched);
        info!(
            ships = parsed.len(),
            boats_with_cabins = stats.len(),
            unmatched,
            "Ship catalog reconciled"
        );
        Ok(parsed)
    }

    /// Fresh fetch, then ships whose destinations or name contain `query`
    pub async fn search_ships(&self, query: &str) -> Result<Vec<ParsedShip>> {
        let ships = self.fetch_ships().await?;
        Ok(search_ships(&ships, query).into_iter().cloned().collect())
    }

    pub async fn list_destinations(&self) -> Result<Vec<String>> {
        let ships = self.fetch_ships().await?;
        Ok(get_destinations(&ships))
    }

    pub async fn ship_by_slug(&self, slug: &str) -> Result<Option<ParsedShip>> {
        let ships = self.fetch_ships().await?;
        Ok(find_ship_by_slug(&ships, slug).cloned())
    }

    async fn fetch_required_ships(&self) -> Result<Vec<Ship>> {
        self.fetch_collection(SHIPS_SOURCE, &self.api.ships_url(), self.api.ships_timeout_ms)
            .await
    }

    async fn fetch_optional_cabins(&self) -> CabinSource {
        match self
            .fetch_collection::<Cabin>(CABINS_SOURCE, &self.api.cabins_url(), self.api.cabins_timeout_ms)
            .await
        {
            Ok(cabins) => CabinSource::Loaded(cabins),
            Err(e) => CabinSource::Degraded { reason: e.to_string() },
        }
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        source: &'static str,
        url: &str,
        timeout_ms: u64,
    ) -> Result<Vec<T>> {
        let started = Instant::now();
        let result = self.fetch_envelope(source, url, timeout_ms).await;

        match &result {
            Ok(records) => {
                debug!(source, url, records = records.len(), "Fetched collection");
                CatalogMetrics::record_request_success(source, started.elapsed().as_secs_f64());
            }
            Err(e) => {
                debug!(source, url, error = %e, "Collection fetch failed");
                CatalogMetrics::record_request_error(source, e.kind());
            }
        }
        result
    }

    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        source: &'static str,
        url: &str,
        timeout_ms: u64,
    ) -> Result<Vec<T>> {
        let response = tokio::time::timeout(Duration::from_millis(timeout_ms), self.http.get(url))
            .await
            .map_err(|_| CatalogError::Timeout {
                endpoint: url.to_string(),
                timeout_ms,
            })??;

        if !response.is_success() {
            return Err(CatalogError::Status {
                endpoint: url.to_string(),
                status: response.status,
            });
        }

        let envelope: ApiEnvelope = serde_json::from_slice(&response.bytes).map_err(|e| {
            if !response.is_json() {
                debug!(source, url, content_type = %response.content_type, "Response is not JSON");
            }
            e
        })?;

        let received = envelope.data.len();
        let records = envelope.into_records::<T>(url)?;
        let skipped = received - records.len();
        if skipped > 0 {
            warn!(source, url, skipped, received, "Skipped unusable records");
            CatalogMetrics::record_skipped_records(source, skipped);
        }
        Ok(records)
    }
}
