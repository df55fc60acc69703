use std::collections::{HashMap, HashSet};

use candela_core::{CandelaError, Instrument, InstrumentId};

/// Resolve `tickers` against a loaded catalog.
///
/// Rules:
/// - Matching is exact on the ticker; when the catalog lists a ticker twice the first
///   listing wins.
/// - An unknown ticker yields an `UnresolvedTicker` warning.
/// - Tickers that resolve to an instrument already resolved are dropped, so each
///   instrument is fetched once.
/// - Resolved instruments keep the order of `tickers`.
pub fn resolve_tickers(
    catalog: &[Instrument],
    tickers: &[String],
) -> (Vec<Instrument>, Vec<CandelaError>) {
    let mut by_ticker: HashMap<&str, &Instrument> = HashMap::with_capacity(catalog.len());
    for inst in catalog {
        by_ticker.entry(inst.ticker.as_str()).or_insert(inst);
    }

    let mut seen: HashSet<&InstrumentId> = HashSet::new();
    let mut resolved = Vec::new();
    let mut warnings = Vec::new();
    for ticker in tickers {
        match by_ticker.get(ticker.as_str()) {
            Some(inst) => {
                if seen.insert(&inst.id) {
                    resolved.push((*inst).clone());
                }
            }
            None => warnings.push(CandelaError::unresolved_ticker(ticker.as_str())),
        }
    }
    (resolved, warnings)
}
