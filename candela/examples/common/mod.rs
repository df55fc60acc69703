use candela::CandelaConnector;
use std::sync::Arc;

/// T-Invest connector when `TINVEST_TOKEN` is set, the deterministic mock otherwise
/// (or whenever `CANDELA_EXAMPLES_USE_MOCK` is set).
#[must_use]
pub fn get_connector() -> Arc<dyn CandelaConnector> {
    let token = std::env::var("TINVEST_TOKEN").ok();
    match token {
        Some(token) if std::env::var("CANDELA_EXAMPLES_USE_MOCK").is_err() => {
            let cfg = candela_tinvest::TinvestConfig::new(token);
            match candela_tinvest::TinvestConnector::new(cfg) {
                Ok(c) => Arc::new(c),
                Err(e) => {
                    eprintln!("--- (T-Invest unavailable: {e}; using Mock Connector) ---");
                    Arc::new(candela_mock::MockConnector::new())
                }
            }
        }
        _ => {
            println!("--- (Using Mock Connector) ---");
            Arc::new(candela_mock::MockConnector::new())
        }
    }
}
