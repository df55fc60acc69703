//! JSON shapes of the T-Invest REST gateway and their conversion into candela types.
//!
//! The gateway follows the protobuf JSON mapping: field names are camelCase, 64-bit
//! integers may arrive as strings, and fields holding their zero value are omitted.

use candela_core::{CandelaError, Candle, Instrument, InstrumentKind, Quotation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const CANDLE_INTERVAL_DAY: &str = "CANDLE_INTERVAL_DAY";
pub(crate) const INSTRUMENT_STATUS_BASE: &str = "INSTRUMENT_STATUS_BASE";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetCandlesRequest<'a> {
    pub figi: &'a str,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub interval: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstrumentsRequest {
    pub instrument_status: &'static str,
}

/// int64 as emitted by the gateway: quoted by default, plain numbers are tolerated.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum I64Wire {
    Num(i64),
    Str(String),
}

impl I64Wire {
    fn value(&self, field: &str) -> Result<i64, CandelaError> {
        match self {
            Self::Num(n) => Ok(*n),
            Self::Str(s) => s.trim().parse().map_err(|_| {
                CandelaError::MalformedCandle(format!("{field} is not an integer: {s:?}"))
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuotationWire {
    #[serde(default)]
    units: Option<I64Wire>,
    #[serde(default)]
    nano: i32,
}

impl QuotationWire {
    fn into_quotation(self) -> Result<Quotation, CandelaError> {
        let units = match &self.units {
            Some(u) => u.value("units")?,
            None => 0,
        };
        Ok(Quotation::new(units, self.nano))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandleWire {
    #[serde(default)]
    open: Option<QuotationWire>,
    #[serde(default)]
    high: Option<QuotationWire>,
    #[serde(default)]
    low: Option<QuotationWire>,
    #[serde(default)]
    close: Option<QuotationWire>,
    #[serde(default)]
    volume: Option<I64Wire>,
    time: DateTime<Utc>,
    #[serde(default)]
    is_complete: bool,
}

fn price(q: Option<QuotationWire>) -> Result<Option<Quotation>, CandelaError> {
    q.map(QuotationWire::into_quotation).transpose()
}

impl CandleWire {
    pub(crate) fn into_candle(self) -> Result<Candle, CandelaError> {
        let volume = match &self.volume {
            Some(v) => v.value("volume")?,
            None => 0,
        };
        Ok(Candle {
            time: self.time,
            open: price(self.open)?,
            high: price(self.high)?,
            low: price(self.low)?,
            close: price(self.close)?,
            volume,
            is_complete: self.is_complete,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetCandlesResponse {
    #[serde(default)]
    pub candles: Vec<CandleWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstrumentWire {
    figi: String,
    ticker: String,
    #[serde(default)]
    name: String,
}

impl InstrumentWire {
    pub(crate) fn into_instrument(self, kind: InstrumentKind) -> Instrument {
        Instrument::new(self.figi, self.ticker, kind, self.name)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstrumentsResponse {
    #[serde(default)]
    pub instruments: Vec<InstrumentWire>,
}
