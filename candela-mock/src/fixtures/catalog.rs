use candela_core::{Instrument, InstrumentKind};

pub const FAIL_ID: &str = "MOCK00FAIL00";
pub const MALFORMED_ID: &str = "MOCK00MALF00";

const ROWS: &[(&str, &str, InstrumentKind, &str)] = &[
    ("BBG004730JJ5", "MOEX", InstrumentKind::Share, "Moscow Exchange"),
    ("BBG004730N88", "SBER", InstrumentKind::Share, "Sberbank"),
    ("BBG004730RP0", "GAZP", InstrumentKind::Share, "Gazprom"),
    ("BBG00Y91R9T3", "SU26238RMFS4", InstrumentKind::Bond, "OFZ 26238"),
    ("TCS60A101X76", "TMOS", InstrumentKind::Etf, "Tinkoff iMOEX"),
    (FAIL_ID, "FAIL", InstrumentKind::Share, "Always Failing"),
    (MALFORMED_ID, "MALFORMED", InstrumentKind::Share, "Malformed Quotes"),
];

pub fn all() -> Vec<Instrument> {
    ROWS.iter()
        .map(|(id, ticker, kind, name)| Instrument::new(*id, *ticker, *kind, *name))
        .collect()
}

/// Base price, in whole units, of each fixture instrument.
pub fn base_price(id: &str) -> Option<i64> {
    match id {
        "BBG004730JJ5" => Some(180),
        "BBG004730N88" => Some(270),
        "BBG004730RP0" => Some(160),
        "BBG00Y91R9T3" => Some(650),
        "TCS60A101X76" => Some(6),
        MALFORMED_ID => Some(1),
        _ => None,
    }
}
