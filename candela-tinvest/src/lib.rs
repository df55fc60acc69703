//! candela-tinvest
//!
//! Connector that implements `CandelaConnector` on top of the T-Invest (Tinkoff
//! Invest) REST gateway. Serves daily candles by FIGI and an instrument catalog made
//! of shares, bonds and ETFs.
#![warn(missing_docs)]

/// Adapter trait and the production adapter backed by `reqwest`.
pub mod adapter;
mod config;
mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};

use adapter::{RealAdapter, TinvestApi};
use candela_core::{
    CandelaError, Candle, DateRange, Instrument, InstrumentId,
    connector::{CandelaConnector, CandleProvider, ConnectorKey, InstrumentCatalog},
};

pub use config::{DEFAULT_BASE_URL, TinvestConfig};

/// Days covered by a request without a range, counted back from today.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 350;

/// Public connector type. Construct with `TinvestConnector::new(TinvestConfig::new(token))`.
pub struct TinvestConnector {
    api: Arc<dyn TinvestApi>,
}

impl TinvestConnector {
    /// Static connector key used in logs and error tags.
    pub const KEY: ConnectorKey = ConnectorKey::new("candela-tinvest");

    /// Build a connector talking to the gateway described by `cfg`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty token and `Request` if the HTTP client cannot
    /// be built.
    pub fn new(cfg: TinvestConfig) -> Result<Self, CandelaError> {
        let api: Arc<dyn TinvestApi> = Arc::new(RealAdapter::new(&cfg)?);
        Ok(Self { api })
    }

    /// Build a connector around any `TinvestApi` implementation.
    #[must_use]
    pub fn from_adapter(api: Arc<dyn TinvestApi>) -> Self {
        Self { api }
    }

    /// Request bounds for `range`; `None` means the trailing lookback window ending
    /// with `today`.
    fn request_bounds(
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let range = range.unwrap_or_else(|| {
            let start = today
                .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
                .unwrap_or(NaiveDate::MIN);
            DateRange::new(start, today).unwrap_or(DateRange::single(today))
        });
        range.utc_bounds()
    }
}

impl CandelaConnector for TinvestConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "T-Invest"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }

    fn as_instrument_catalog(&self) -> Option<&dyn InstrumentCatalog> {
        Some(self as &dyn InstrumentCatalog)
    }
}

#[async_trait]
impl CandleProvider for TinvestConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela_tinvest::candles",
            skip(self),
            fields(figi = %id, range = ?range),
        )
    )]
    async fn candles(
        &self,
        id: &InstrumentId,
        range: Option<DateRange>,
    ) -> Result<Vec<Candle>, CandelaError> {
        let (from, to) = Self::request_bounds(range, Utc::now().date_naive());
        let candles = self.api.get_candles(id.as_str(), from, to).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = candles.len(), "received candles");
        Ok(candles)
    }
}

#[async_trait]
impl InstrumentCatalog for TinvestConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "candela_tinvest::instruments", skip(self))
    )]
    async fn instruments(&self) -> Result<Vec<Instrument>, CandelaError> {
        let mut all = self.api.shares().await?;
        all.extend(self.api.bonds().await?);
        all.extend(self.api.etfs().await?);
        #[cfg(feature = "tracing")]
        tracing::debug!(count = all.len(), "loaded instrument catalog");
        Ok(all)
    }
}
