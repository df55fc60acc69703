#![allow(dead_code)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_const_for_fn)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candela_core::connector::{CandleProvider, InstrumentCatalog};
use candela_core::{
    CandelaConnector, CandelaError, Candle, DateRange, Instrument, InstrumentId, Quotation,
};
use chrono::{NaiveDate, NaiveTime};
use tokio::time::{Duration, sleep};

type CandlesFn =
    Arc<dyn Fn(&InstrumentId, Option<DateRange>) -> Result<Vec<Candle>, CandelaError> + Send + Sync>;

/// Simple in-memory connector used by integration tests.
/// You can tailor behavior (catalog, candles, per-chunk delays) via fields below.
pub struct MockConnector {
    pub name: &'static str,
    pub catalog: Option<Vec<Instrument>>,
    pub delay_ms: u64,
    pub catalog_delay_ms: u64,

    // Optional closures to customize behavior per test
    pub candles_fn: Option<CandlesFn>,
    pub catalog_fn: Option<Arc<dyn Fn() -> Result<Vec<Instrument>, CandelaError> + Send + Sync>>,
    pub delay_fn: Option<Arc<dyn Fn(Option<DateRange>) -> u64 + Send + Sync>>,

    /// Every candle request in the order it was issued.
    pub calls: Arc<Mutex<Vec<(InstrumentId, Option<DateRange>)>>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            catalog: None,
            delay_ms: 0,
            catalog_delay_ms: 0,
            candles_fn: None,
            catalog_fn: None,
            delay_fn: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockConnector {
    pub fn calls(&self) -> Vec<(InstrumentId, Option<DateRange>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandleProvider for MockConnector {
    async fn candles(
        &self,
        id: &InstrumentId,
        range: Option<DateRange>,
    ) -> Result<Vec<Candle>, CandelaError> {
        self.calls.lock().unwrap().push((id.clone(), range));
        let delay = self.delay_fn.as_ref().map_or(self.delay_ms, |f| (f)(range));
        if delay > 0 {
            sleep(Duration::from_millis(delay)).await;
        }
        match &self.candles_fn {
            Some(f) => (f)(id, range),
            None => Err(CandelaError::unsupported("candles")),
        }
    }
}

#[async_trait]
impl InstrumentCatalog for MockConnector {
    async fn instruments(&self) -> Result<Vec<Instrument>, CandelaError> {
        if self.catalog_delay_ms > 0 {
            sleep(Duration::from_millis(self.catalog_delay_ms)).await;
        }
        if let Some(f) = &self.catalog_fn {
            return (f)();
        }
        self.catalog
            .clone()
            .ok_or_else(|| CandelaError::unsupported("catalog"))
    }
}

impl CandelaConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        if self.candles_fn.is_some() {
            Some(self as &dyn CandleProvider)
        } else {
            None
        }
    }

    fn as_instrument_catalog(&self) -> Option<&dyn InstrumentCatalog> {
        if self.catalog.is_some() || self.catalog_fn.is_some() {
            Some(self as &dyn InstrumentCatalog)
        } else {
            None
        }
    }
}

/// Daily candle with flat OHLC at `close` (whole units).
pub fn candle(date: NaiveDate, close: i64) -> Candle {
    let q = Some(Quotation::new(close, 0));
    Candle {
        time: date.and_time(NaiveTime::from_hms_opt(7, 0, 0).unwrap()).and_utc(),
        open: q,
        high: q,
        low: q,
        close: q,
        volume: 100,
        is_complete: true,
    }
}

/// One candle per calendar day of `range`; the close encodes the day of year.
pub fn daily_candles(range: DateRange) -> Vec<Candle> {
    range
        .start()
        .iter_days()
        .take_while(|d| *d <= range.end())
        .map(|d| candle(d, i64::from(chrono::Datelike::ordinal(&d))))
        .collect()
}

/// Connector with `catalog` whose candle requests are answered by `f`.
pub fn m_candles<F>(name: &'static str, catalog: Vec<Instrument>, f: F) -> MockConnector
where
    F: Fn(&InstrumentId, Option<DateRange>) -> Result<Vec<Candle>, CandelaError>
        + Send
        + Sync
        + 'static,
{
    MockConnector {
        name,
        catalog: Some(catalog),
        candles_fn: Some(Arc::new(f)),
        ..Default::default()
    }
}

/// Box a candle closure for `MockConnector::candles_fn`.
pub fn candles_fn<F>(f: F) -> Option<CandlesFn>
where
    F: Fn(&InstrumentId, Option<DateRange>) -> Result<Vec<Candle>, CandelaError>
        + Send
        + Sync
        + 'static,
{
    Some(Arc::new(f))
}
