#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use candela_core::{CandelaError, Candle, Instrument, InstrumentKind};

use crate::TinvestConfig;
use crate::wire::{
    CANDLE_INTERVAL_DAY, GetCandlesRequest, GetCandlesResponse, INSTRUMENT_STATUS_BASE,
    InstrumentsRequest, InstrumentsResponse,
};

const CONNECTOR: &str = "candela-tinvest";
const MARKET_DATA: &str = "tinkoff.public.invest.api.contract.v1.MarketDataService";
const INSTRUMENTS: &str = "tinkoff.public.invest.api.contract.v1.InstrumentsService";

/// Raw access to the T-Invest API (so we can inject mocks in tests).
#[async_trait]
pub trait TinvestApi: Send + Sync {
    /// Daily candles of `figi` for the half-open interval `[from, to)`.
    async fn get_candles(
        &self,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, CandelaError>;

    /// Tradable shares.
    async fn shares(&self) -> Result<Vec<Instrument>, CandelaError>;

    /// Tradable bonds.
    async fn bonds(&self) -> Result<Vec<Instrument>, CandelaError>;

    /// Tradable exchange-traded funds.
    async fn etfs(&self) -> Result<Vec<Instrument>, CandelaError>;
}

/// Production adapter: JSON over the REST gateway with a shared `reqwest` client.
///
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections internally.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RealAdapter {
    /// Build an adapter from connection settings.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty token and `Request` if the HTTP client cannot
    /// be built.
    pub fn new(cfg: &TinvestConfig) -> Result<Self, CandelaError> {
        if cfg.token.trim().is_empty() {
            return Err(CandelaError::InvalidArg("T-Invest token is empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| CandelaError::request(CONNECTOR, format!("http client: {e}")))?;
        Ok(Self::with_client(http, cfg))
    }

    /// Wrap an existing `reqwest::Client`; the config's timeout is not applied.
    #[must_use]
    pub fn with_client(http: reqwest::Client, cfg: &TinvestConfig) -> Self {
        Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
        }
    }

    async fn call<B, R>(
        &self,
        service: &str,
        method: &str,
        body: &B,
        what: &str,
    ) -> Result<R, CandelaError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{service}/{method}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, what))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CandelaError::not_found(what.to_string()));
        }
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::debug!(%status, %url, "T-Invest call rejected");
            return Err(CandelaError::request(
                CONNECTOR,
                format!("status {}: {what}", status.as_u16()),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| map_transport_err(&e, what))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CandelaError::request(CONNECTOR, format!("invalid response for {what}: {e}"))
        })
    }

    async fn instruments(
        &self,
        method: &str,
        kind: InstrumentKind,
    ) -> Result<Vec<Instrument>, CandelaError> {
        let body = InstrumentsRequest {
            instrument_status: INSTRUMENT_STATUS_BASE,
        };
        let resp: InstrumentsResponse = self
            .call(INSTRUMENTS, method, &body, &format!("{kind} catalog"))
            .await?;
        Ok(resp
            .instruments
            .into_iter()
            .map(|i| i.into_instrument(kind))
            .collect())
    }
}

fn map_transport_err(e: &reqwest::Error, what: &str) -> CandelaError {
    if e.is_timeout() {
        CandelaError::request(CONNECTOR, format!("timed out: {what}"))
    } else {
        CandelaError::request(CONNECTOR, format!("{what}: {e}"))
    }
}

#[async_trait]
impl TinvestApi for RealAdapter {
    async fn get_candles(
        &self,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, CandelaError> {
        let body = GetCandlesRequest {
            figi,
            from,
            to,
            interval: CANDLE_INTERVAL_DAY,
        };
        let resp: GetCandlesResponse = self
            .call(MARKET_DATA, "GetCandles", &body, &format!("candles for {figi}"))
            .await?;
        resp.candles
            .into_iter()
            .map(crate::wire::CandleWire::into_candle)
            .collect()
    }

    async fn shares(&self) -> Result<Vec<Instrument>, CandelaError> {
        self.instruments("Shares", InstrumentKind::Share).await
    }

    async fn bonds(&self) -> Result<Vec<Instrument>, CandelaError> {
        self.instruments("Bonds", InstrumentKind::Bond).await
    }

    async fn etfs(&self) -> Result<Vec<Instrument>, CandelaError> {
        self.instruments("Etfs", InstrumentKind::Etf).await
    }
}

#[cfg(feature = "test-adapters")]
type CandlesFn =
    dyn Fn(String, DateTime<Utc>, DateTime<Utc>) -> Result<Vec<Candle>, CandelaError> + Send + Sync;
#[cfg(feature = "test-adapters")]
type ListFn = dyn Fn(InstrumentKind) -> Result<Vec<Instrument>, CandelaError> + Send + Sync;

/// Closure-backed `TinvestApi` for tests.
#[cfg(feature = "test-adapters")]
pub struct FnApi {
    candles: Box<CandlesFn>,
    list: Box<ListFn>,
}

#[cfg(feature = "test-adapters")]
impl FnApi {
    /// Build from a candle closure and a catalog closure keyed by instrument kind.
    pub fn new<C, L>(candles: C, list: L) -> Self
    where
        C: Fn(String, DateTime<Utc>, DateTime<Utc>) -> Result<Vec<Candle>, CandelaError>
            + Send
            + Sync
            + 'static,
        L: Fn(InstrumentKind) -> Result<Vec<Instrument>, CandelaError> + Send + Sync + 'static,
    {
        Self {
            candles: Box::new(candles),
            list: Box::new(list),
        }
    }
}

#[cfg(feature = "test-adapters")]
impl dyn TinvestApi {
    /// Build a `TinvestApi` from closures (tests only).
    pub fn from_fns<C, L>(candles: C, list: L) -> Arc<dyn TinvestApi>
    where
        C: Fn(String, DateTime<Utc>, DateTime<Utc>) -> Result<Vec<Candle>, CandelaError>
            + Send
            + Sync
            + 'static,
        L: Fn(InstrumentKind) -> Result<Vec<Instrument>, CandelaError> + Send + Sync + 'static,
    {
        Arc::new(FnApi::new(candles, list))
    }
}

#[cfg(feature = "test-adapters")]
#[async_trait]
impl TinvestApi for FnApi {
    async fn get_candles(
        &self,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, CandelaError> {
        (self.candles)(figi.to_string(), from, to)
    }

    async fn shares(&self) -> Result<Vec<Instrument>, CandelaError> {
        (self.list)(InstrumentKind::Share)
    }

    async fn bonds(&self) -> Result<Vec<Instrument>, CandelaError> {
        (self.list)(InstrumentKind::Bond)
    }

    async fn etfs(&self) -> Result<Vec<Instrument>, CandelaError> {
        (self.list)(InstrumentKind::Etf)
    }
}
