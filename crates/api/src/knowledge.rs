//! Startup loading of the region carbon-intensity table.
//!
//! The table is read from a file or fetched over HTTP, retried with linear
//! backoff on I/O and fetch failures, then published into
//! [`AppState::knowledge`]. Until then region-dependent endpoints answer 503.

use std::sync::OnceLock;

use carbontune_core::carbon_intensity::{CarbonIntensityError, RegionCarbonIntensity, RegionLoad};
use carbontune_core::knowledge_base::KnowledgeBase;
use tokio::task::JoinHandle;

use crate::config::{RegionLoadConfig, RegionSource};
use crate::state::AppState;

/// Read and parse the region table once.
pub async fn fetch_regions(source: &RegionSource) -> Result<RegionLoad, CarbonIntensityError> {
    let text = match source {
        RegionSource::File(path) => tokio::fs::read_to_string(path).await?,
        RegionSource::Url(url) => reqwest::get(url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CarbonIntensityError::Fetch(e.to_string()))?
            .text()
            .await
            .map_err(|e| CarbonIntensityError::Fetch(e.to_string()))?,
    };
    RegionCarbonIntensity::from_csv_str(&text)
}

/// Only source access failures are worth retrying; a malformed file stays malformed.
fn is_transient(err: &CarbonIntensityError) -> bool {
    matches!(
        err,
        CarbonIntensityError::Io(_) | CarbonIntensityError::Fetch(_)
    )
}

/// [`fetch_regions`] with up to `config.attempts` tries.
pub async fn load_regions(config: &RegionLoadConfig) -> Result<RegionLoad, CarbonIntensityError> {
    let mut attempt: u32 = 1;
    loop {
        match fetch_regions(&config.source).await {
            Ok(load) => return Ok(load),
            Err(err) if attempt < config.attempts && is_transient(&err) => {
                let delay = config.retry_delay * attempt;
                tracing::warn!(
                    source = %config.source,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Region table load failed, retrying",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Log the load report and publish the Knowledge Base.
///
/// Returns `false` if a Knowledge Base was already published.
pub fn publish(cell: &OnceLock<KnowledgeBase>, load: RegionLoad) -> bool {
    for row in &load.skipped {
        tracing::warn!(line = row.line, reason = %row.reason, "Skipped carbon intensity row");
    }
    tracing::info!(
        regions = load.table.len(),
        skipped = load.skipped.len(),
        "Carbon intensity table loaded",
    );
    cell.set(KnowledgeBase::new(load.table)).is_ok()
}

/// Spawn the background task that loads and publishes the region table.
pub fn spawn_region_loader(state: &AppState) -> JoinHandle<()> {
    let config = state.config.regions.clone();
    let cell = state.knowledge.clone();
    tokio::spawn(async move {
        match load_regions(&config).await {
            Ok(load) => {
                if !publish(&cell, load) {
                    tracing::warn!("Knowledge Base was already published, ignoring reload");
                }
            }
            Err(err) => {
                tracing::error!(
                    source = %config.source,
                    error = %err,
                    "Failed to load carbon intensity table; estimation stays unavailable",
                );
            }
        }
    })
}
