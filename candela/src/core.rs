use std::sync::Arc;
use std::time::Duration;

use candela_core::{CandelaConfig, CandelaConnector, CandelaError};

/// Orchestrator that drives chunked candle fetches through registered connectors.
pub struct Candela {
    pub(crate) connectors: Vec<Arc<dyn CandelaConnector>>,
    pub(crate) cfg: CandelaConfig,
}

/// Builder for constructing a `Candela` orchestrator with custom configuration.
pub struct CandelaBuilder {
    connectors: Vec<Arc<dyn CandelaConnector>>,
    cfg: CandelaConfig,
}

impl Default for CandelaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandelaBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 350-day chunks, 5s per-chunk timeout, one chunk in flight at a time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: CandelaConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Candle requests go to the first registered connector that serves candles;
    /// ticker resolution goes to the first one that exposes a catalog. A single
    /// connector usually does both.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn CandelaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Largest `end - start` distance, in days, of a single candle request.
    #[must_use]
    pub const fn max_chunk_span_days(mut self, days: u32) -> Self {
        self.cfg.max_chunk_span_days = days;
        self
    }

    /// Timeout applied to each candle request (one chunk).
    ///
    /// A timed-out chunk is skipped like any other failed chunk.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Timeout applied to the instrument catalog load.
    ///
    /// A timed-out catalog leaves every ticker unresolved.
    #[must_use]
    pub const fn catalog_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.catalog_timeout = timeout;
        self
    }

    /// Number of chunks of one instrument fetched concurrently.
    ///
    /// Results are always reassembled in chunk order regardless of completion order.
    #[must_use]
    pub const fn max_concurrent_chunks(mut self, n: usize) -> Self {
        self.cfg.max_concurrent_chunks = n;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: CandelaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Candela` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`]
    /// or if `max_concurrent_chunks` is zero.
    ///
    /// [`with_connector`]: CandelaBuilder::with_connector
    pub fn build(self) -> Result<Candela, CandelaError> {
        if self.connectors.is_empty() {
            return Err(CandelaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.max_concurrent_chunks == 0 {
            return Err(CandelaError::InvalidArg(
                "max_concurrent_chunks must be at least 1".to_string(),
            ));
        }

        Ok(Candela {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attach the connector name to errors that do not already carry provenance.
pub(crate) fn tag_err(connector: &str, e: CandelaError) -> CandelaError {
    match e {
        e @ (CandelaError::NotFound { .. }
        | CandelaError::UnresolvedTicker { .. }
        | CandelaError::ProviderTimeout { .. }
        | CandelaError::Request { .. }
        | CandelaError::MalformedCandle(_)) => e,
        other => CandelaError::request(connector, other.to_string()),
    }
}

impl Candela {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, CandelaError>
    where
        Fut: core::future::Future<Output = Result<T, CandelaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CandelaError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Candela` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let candela = candela::Candela::builder()
    ///     .with_connector(Arc::new(candela_mock::MockConnector::new()))
    ///     .max_chunk_span_days(350)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> CandelaBuilder {
        CandelaBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CandelaConfig {
        &self.cfg
    }

    pub(crate) fn candle_connector(&self) -> Result<Arc<dyn CandelaConnector>, CandelaError> {
        self.connectors
            .iter()
            .find(|c| c.as_candle_provider().is_some())
            .cloned()
            .ok_or_else(|| CandelaError::unsupported(candela_core::Capability::Candles.as_str()))
    }

    pub(crate) fn catalog_connector(&self) -> Result<Arc<dyn CandelaConnector>, CandelaError> {
        self.connectors
            .iter()
            .find(|c| c.as_instrument_catalog().is_some())
            .cloned()
            .ok_or_else(|| CandelaError::unsupported(candela_core::Capability::Catalog.as_str()))
    }
}
