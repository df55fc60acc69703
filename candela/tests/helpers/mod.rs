// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::{MockConnector, candle, candles_fn, daily_candles, m_candles};

use candela_core::{DateRange, Instrument, InstrumentKind};
use chrono::NaiveDate;

// ---------- Lightweight fixtures and helpers for tests ----------

pub const SBER_FIGI: &str = "BBG004730N88";
pub const GAZP_FIGI: &str = "BBG004730RP0";
pub const MOEX_FIGI: &str = "BBG004730JJ5";

pub fn sber() -> Instrument {
    Instrument::new(SBER_FIGI, "SBER", InstrumentKind::Share, "Sberbank")
}

pub fn gazp() -> Instrument {
    Instrument::new(GAZP_FIGI, "GAZP", InstrumentKind::Share, "Gazprom")
}

pub fn moex() -> Instrument {
    Instrument::new(MOEX_FIGI, "MOEX", InstrumentKind::Share, "Moscow Exchange")
}

pub fn catalog() -> Vec<Instrument> {
    vec![moex(), sber(), gazp()]
}

/// Construct a date from components for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("invalid date")
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).expect("valid test range")
}
