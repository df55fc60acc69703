//! Configuration shared by the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest span, in days, a single candle request may cover by default.
pub const DEFAULT_MAX_CHUNK_SPAN_DAYS: u32 = 350;

/// Default budget for loading the whole instrument catalog.
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(90);

const fn default_catalog_timeout() -> Duration {
    DEFAULT_CATALOG_TIMEOUT
}

/// Global configuration for the `Candela` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandelaConfig {
    /// Maximum `end - start` distance, in days, of one candle request.
    ///
    /// Long ranges are split into chunks of `max_chunk_span_days + 1` calendar days.
    pub max_chunk_span_days: u32,
    /// Timeout for each candle request (one chunk).
    pub provider_timeout: Duration,
    /// Timeout for one catalog load, covering every listing request it makes.
    #[serde(default = "default_catalog_timeout")]
    pub catalog_timeout: Duration,
    /// Chunk requests allowed in flight for one instrument.
    ///
    /// Results are always reassembled in chunk order, whatever the completion order.
    pub max_concurrent_chunks: usize,
}

impl Default for CandelaConfig {
    fn default() -> Self {
        Self {
            max_chunk_span_days: DEFAULT_MAX_CHUNK_SPAN_DAYS,
            provider_timeout: Duration::from_secs(5),
            catalog_timeout: DEFAULT_CATALOG_TIMEOUT,
            max_concurrent_chunks: 1,
        }
    }
}
