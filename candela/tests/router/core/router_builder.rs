use std::sync::Arc;
use std::time::Duration;

use candela::{Candela, CandelaConfig, CandelaError};

use crate::helpers::{MockConnector, candles_fn, catalog, daily_candles, m_candles};

#[test]
fn build_without_connectors_is_rejected() {
    let err = Candela::builder().build().err().unwrap();
    assert!(matches!(err, CandelaError::InvalidArg(_)));
}

#[test]
fn zero_concurrency_is_rejected() {
    let c = Arc::new(m_candles("m", catalog(), |_, _| Ok(vec![])));
    let err = Candela::builder()
        .with_connector(c)
        .max_concurrent_chunks(0)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CandelaError::InvalidArg(_)));
}

#[test]
fn defaults_and_overrides() {
    let c = Arc::new(m_candles("m", catalog(), |_, _| Ok(vec![])));
    let candela = Candela::builder().with_connector(c.clone()).build().unwrap();
    assert_eq!(candela.config(), &CandelaConfig::default());
    assert_eq!(candela.config().max_chunk_span_days, 350);
    assert_eq!(candela.config().provider_timeout, Duration::from_secs(5));
    assert_eq!(candela.config().catalog_timeout, Duration::from_secs(90));
    assert_eq!(candela.config().max_concurrent_chunks, 1);

    let candela = Candela::builder()
        .with_connector(c)
        .max_chunk_span_days(30)
        .provider_timeout(Duration::from_millis(250))
        .catalog_timeout(Duration::from_secs(2))
        .max_concurrent_chunks(3)
        .build()
        .unwrap();
    assert_eq!(candela.config().max_chunk_span_days, 30);
    assert_eq!(candela.config().provider_timeout, Duration::from_millis(250));
    assert_eq!(candela.config().catalog_timeout, Duration::from_secs(2));
    assert_eq!(candela.config().max_concurrent_chunks, 3);
}

#[tokio::test]
async fn fetch_without_candle_capability_is_unsupported() {
    let c = Arc::new(MockConnector {
        name: "catalog_only",
        catalog: Some(catalog()),
        ..Default::default()
    });
    let candela = Candela::builder().with_connector(c).build().unwrap();
    let err = candela
        .fetch_series(&crate::helpers::sber(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::Unsupported { .. }));
}

#[tokio::test]
async fn download_without_catalog_is_unsupported() {
    let c = Arc::new(MockConnector {
        name: "candles_only",
        candles_fn: candles_fn(|_, _| Ok(vec![])),
        ..Default::default()
    });
    let candela = Candela::builder().with_connector(c).build().unwrap();
    let err = candela.download().tickers(["SBER"]).run().await.unwrap_err();
    assert!(matches!(err, CandelaError::Unsupported { .. }));
}

#[tokio::test]
async fn capabilities_may_come_from_different_connectors() {
    let catalog_only = Arc::new(MockConnector {
        name: "catalog_only",
        catalog: Some(catalog()),
        ..Default::default()
    });
    let candles_only = Arc::new(MockConnector {
        name: "candles_only",
        candles_fn: candles_fn(|_, r| Ok(r.map(daily_candles).unwrap_or_default())),
        ..Default::default()
    });
    let candela = Candela::builder()
        .with_connector(catalog_only)
        .with_connector(candles_only.clone())
        .build()
        .unwrap();
    let report = candela
        .download()
        .tickers(["SBER"])
        .period(crate::helpers::d(2024, 1, 1), crate::helpers::d(2024, 1, 10))
        .run()
        .await
        .unwrap();
    assert_eq!(report.response.unwrap().height(), 10);
    assert_eq!(candles_only.calls().len(), 1);
}
