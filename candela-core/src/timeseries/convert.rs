use crate::{CandelaError, Candle, CandleRow, CandleTable, Quotation};

fn price(
    q: Option<Quotation>,
    field: &str,
    candle: &Candle,
) -> Result<rust_decimal::Decimal, CandelaError> {
    q.ok_or_else(|| {
        CandelaError::MalformedCandle(format!("candle at {} has no {field} price", candle.time))
    })?
    .to_decimal()
}

/// Convert one raw candle into a decimal row dated by its UTC calendar day.
///
/// # Errors
/// Returns `CandelaError::MalformedCandle` if a price is missing or not a valid
/// quotation.
pub fn candle_to_row(candle: &Candle) -> Result<CandleRow, CandelaError> {
    Ok(CandleRow {
        date: candle.time.date_naive(),
        open: price(candle.open, "open", candle)?,
        high: price(candle.high, "high", candle)?,
        low: price(candle.low, "low", candle)?,
        close: price(candle.close, "close", candle)?,
        volume: candle.volume,
    })
}

/// Convert a batch of candles, preserving input order.
///
/// An empty batch yields an empty table. Incomplete (in-progress) candles are kept.
///
/// # Errors
/// Fails on the first malformed candle; the whole batch is rejected.
pub fn candles_to_table(candles: &[Candle]) -> Result<CandleTable, CandelaError> {
    let rows = candles
        .iter()
        .map(candle_to_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CandleTable { rows })
}
