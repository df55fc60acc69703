use async_trait::async_trait;

use crate::CandelaError;
pub use candela_types::ConnectorKey;
use candela_types::{Candle, DateRange, Instrument, InstrumentId};

/// Focused role trait for connectors that serve daily candles.
///
/// This is the fetch capability the series pipeline drives once per chunk.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch daily candles for `id` over `range`.
    ///
    /// `range` is `None` for an open-ended "everything available" request; the
    /// connector decides what that means for its API. Candles are returned in the
    /// order the upstream produced them.
    async fn candles(
        &self,
        id: &InstrumentId,
        range: Option<DateRange>,
    ) -> Result<Vec<Candle>, CandelaError>;
}

/// Focused role trait for connectors that can list their tradable instruments.
#[async_trait]
pub trait InstrumentCatalog: Send + Sync {
    /// Load the full catalog (shares, bonds, funds, ...).
    async fn instruments(&self) -> Result<Vec<Instrument>, CandelaError>;

    /// Resolve one ticker against the catalog.
    ///
    /// Default: loads the whole catalog and picks the first exact ticker match.
    async fn resolve(&self, ticker: &str) -> Result<Instrument, CandelaError> {
        self.instruments()
            .await?
            .into_iter()
            .find(|i| i.ticker == ticker)
            .ok_or_else(|| CandelaError::unresolved_ticker(ticker))
    }
}

/// Main connector trait implemented by data sources.
///
/// Capabilities are advertised through `as_*` accessors returning trait objects, so a
/// connector may serve candles, a catalog, or both.
pub trait CandelaConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g., "candela-tinvest").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise candle capability by returning a usable trait object reference when supported.
    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        None
    }

    /// Advertise catalog capability by returning a usable trait object reference when supported.
    fn as_instrument_catalog(&self) -> Option<&dyn InstrumentCatalog> {
        None
    }
}
