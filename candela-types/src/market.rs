//! Provider-facing market records: fixed-point quotations and raw daily candles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CandelaError;

/// Number of `nano` units in one whole unit.
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

/// Two-part fixed-point price as transported by brokerage APIs.
///
/// The represented value is `units + nano / 1e9`. A well-formed quotation keeps
/// `|nano| < 1e9` and never mixes signs between the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Quotation {
    /// Whole units.
    pub units: i64,
    /// Fractional part in billionths.
    pub nano: i32,
}

impl Quotation {
    /// Construct a quotation without validation.
    #[must_use]
    pub const fn new(units: i64, nano: i32) -> Self {
        Self { units, nano }
    }

    /// Exact decimal value of the quotation.
    ///
    /// # Errors
    /// Returns `CandelaError::MalformedCandle` if `nano` is out of range or its sign
    /// contradicts `units`.
    pub fn to_decimal(self) -> Result<Decimal, CandelaError> {
        if self.nano <= -NANOS_PER_UNIT || self.nano >= NANOS_PER_UNIT {
            return Err(CandelaError::MalformedCandle(format!(
                "quotation nano out of range: {}",
                self.nano
            )));
        }
        if (self.units > 0 && self.nano < 0) || (self.units < 0 && self.nano > 0) {
            return Err(CandelaError::MalformedCandle(format!(
                "quotation sign mismatch: units={} nano={}",
                self.units, self.nano
            )));
        }
        Ok(Decimal::from(self.units) + Decimal::new(i64::from(self.nano), 9))
    }
}

/// One daily candle exactly as received from a provider.
///
/// Price fields are optional because upstream payloads may omit them; conversion
/// rejects candles with any price missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open instant in UTC.
    pub time: DateTime<Utc>,
    /// Opening price.
    pub open: Option<Quotation>,
    /// Highest price.
    pub high: Option<Quotation>,
    /// Lowest price.
    pub low: Option<Quotation>,
    /// Closing price.
    pub close: Option<Quotation>,
    /// Traded volume in lots.
    pub volume: i64,
    /// False while the trading day is still in progress.
    pub is_complete: bool,
}
