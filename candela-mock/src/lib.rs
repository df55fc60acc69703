//! Deterministic mock connector for tests and examples.
//!
//! The catalog lists a handful of Moscow Exchange instruments (shares, a bond and an
//! ETF). Candle requests are answered with one synthetic candle per weekday of the
//! requested range, so results are reproducible without network access.
//!
//! Special tickers:
//! - `FAIL` resolves, but every candle request fails.
//! - `MALFORMED` resolves, but its first candle of every answer has no close price.
use async_trait::async_trait;
use candela_core::connector::{CandelaConnector, CandleProvider, InstrumentCatalog};
use candela_core::{CandelaError, Candle, DateRange, Instrument, InstrumentId};

mod fixtures;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Static connector name used in error tags.
    pub const NAME: &'static str = "candela-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn forced_failure(capability: &str) -> CandelaError {
        CandelaError::request(Self::NAME, format!("forced failure: {capability}"))
    }
}

impl CandelaConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }

    fn as_instrument_catalog(&self) -> Option<&dyn InstrumentCatalog> {
        Some(self as &dyn InstrumentCatalog)
    }
}

#[async_trait]
impl CandleProvider for MockConnector {
    async fn candles(
        &self,
        id: &InstrumentId,
        range: Option<DateRange>,
    ) -> Result<Vec<Candle>, CandelaError> {
        if id.as_str() == fixtures::catalog::FAIL_ID {
            return Err(Self::forced_failure("candles"));
        }
        let base = fixtures::catalog::base_price(id.as_str())
            .ok_or_else(|| CandelaError::not_found(format!("candles for {id}")))?;
        let range = range
            .or_else(fixtures::candles::default_window)
            .ok_or_else(|| CandelaError::Other("mock window is invalid".into()))?;

        let mut candles = fixtures::candles::weekdays(range, base);
        if id.as_str() == fixtures::catalog::MALFORMED_ID
            && let Some(first) = candles.first_mut()
        {
            first.close = None;
        }
        Ok(candles)
    }
}

#[async_trait]
impl InstrumentCatalog for MockConnector {
    async fn instruments(&self) -> Result<Vec<Instrument>, CandelaError> {
        Ok(fixtures::catalog::all())
    }
}
