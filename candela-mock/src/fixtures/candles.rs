use candela_core::{Candle, DateRange, Quotation};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

/// Window served for open-ended requests.
pub fn default_window() -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(2023, 12, 31)?;
    DateRange::new(start, end).ok()
}

/// One candle per weekday of `range`, priced around `base`.
///
/// The close moves in a sawtooth over the day of month and alternates a half-unit
/// fraction, so values are stable across calls and easy to assert on.
pub fn weekdays(range: DateRange, base: i64) -> Vec<Candle> {
    let open_time = NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN);
    range
        .start()
        .iter_days()
        .take_while(|d| range.contains(*d))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .map(|d| {
            let step = i64::from(d.day() % 10);
            let nano = if d.day() % 2 == 1 { 500_000_000 } else { 0 };
            Candle {
                time: d.and_time(open_time).and_utc(),
                open: Some(Quotation::new(base + step, 0)),
                high: Some(Quotation::new(base + step + 1, 0)),
                low: Some(Quotation::new(base + step - 1, 0)),
                close: Some(Quotation::new(base + step, nano)),
                volume: 1_000 + i64::from(d.ordinal()),
                is_complete: true,
            }
        })
        .collect()
}
