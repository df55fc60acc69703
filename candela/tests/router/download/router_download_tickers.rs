use std::sync::Arc;
use std::time::Duration;

use candela::{Candela, CandelaError, Instrument};

use crate::helpers::{MOEX_FIGI, MockConnector, catalog, d, daily_candles, m_candles};

fn connector() -> Arc<MockConnector> {
    Arc::new(m_candles("m", catalog(), |_, r| {
        Ok(r.map(daily_candles).unwrap_or_default())
    }))
}

#[tokio::test]
async fn unknown_tickers_are_skipped_with_a_warning() {
    let candela = Candela::builder().with_connector(connector()).build().unwrap();
    let report = candela
        .download()
        .tickers(["SBER", "NOPE"])
        .period(d(2024, 1, 1), d(2024, 1, 5))
        .run()
        .await
        .unwrap();
    assert_eq!(report.skipped_tickers(), vec!["NOPE"]);
    let table = report.response.unwrap();
    assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Sberbank"]);
}

#[tokio::test]
async fn no_resolved_ticker_means_no_table() {
    let conn = connector();
    let candela = Candela::builder().with_connector(conn.clone()).build().unwrap();
    let report = candela
        .download()
        .tickers(["AAA", "BBB"])
        .run()
        .await
        .unwrap();
    assert!(report.response.is_none());
    assert_eq!(report.skipped_tickers(), vec!["AAA", "BBB"]);
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn catalog_failure_reports_every_ticker() {
    let conn = Arc::new(MockConnector {
        catalog_fn: Some(Arc::new(|| -> Result<Vec<Instrument>, CandelaError> {
            Err(CandelaError::request("m", "401 unauthorized"))
        })),
        ..m_candles("m", vec![], |_, _| Ok(vec![]))
    });
    let candela = Candela::builder().with_connector(conn).build().unwrap();
    let report = candela
        .download()
        .tickers(["SBER", "GAZP"])
        .run()
        .await
        .unwrap();
    assert!(report.response.is_none());
    assert!(matches!(report.warnings[0], CandelaError::Request { .. }));
    assert_eq!(report.skipped_tickers(), vec!["SBER", "GAZP"]);
}

#[tokio::test]
async fn missing_catalog_is_not_reported_as_a_ticker() {
    let conn = Arc::new(MockConnector {
        catalog_fn: Some(Arc::new(|| -> Result<Vec<Instrument>, CandelaError> {
            Err(CandelaError::not_found("share catalog"))
        })),
        ..m_candles("m", vec![], |_, _| Ok(vec![]))
    });
    let candela = Candela::builder().with_connector(conn).build().unwrap();
    let report = candela.download().tickers(["SBER"]).run().await.unwrap();
    assert!(report.response.is_none());
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0], CandelaError::not_found("share catalog"));
    assert_eq!(report.skipped_tickers(), vec!["SBER"]);
}

#[tokio::test]
async fn benchmark_comes_first_and_is_fetched_once() {
    let conn = connector();
    let candela = Candela::builder().with_connector(conn.clone()).build().unwrap();
    let report = candela
        .download()
        .benchmark("MOEX")
        .tickers(["SBER", "MOEX"])
        .period(d(2024, 1, 1), d(2024, 1, 5))
        .run()
        .await
        .unwrap();
    let table = report.response.unwrap();
    assert_eq!(
        table.labels().collect::<Vec<_>>(),
        vec!["Moscow Exchange", "Sberbank"]
    );
    let moex_calls = conn
        .calls()
        .into_iter()
        .filter(|(id, _)| id.as_str() == MOEX_FIGI)
        .count();
    assert_eq!(moex_calls, 1);
}

#[tokio::test]
async fn empty_ticker_list_is_rejected() {
    let candela = Candela::builder().with_connector(connector()).build().unwrap();
    let err = candela
        .download()
        .tickers(Vec::<String>::new())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::InvalidArg(_)));
}

#[tokio::test]
async fn benchmark_alone_is_enough() {
    let candela = Candela::builder().with_connector(connector()).build().unwrap();
    let report = candela
        .download()
        .benchmark("MOEX")
        .period(d(2024, 1, 1), d(2024, 1, 2))
        .run()
        .await
        .unwrap();
    assert_eq!(report.response.unwrap().num_columns(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_catalog_gets_its_own_timeout() {
    let slow = || {
        Arc::new(MockConnector {
            catalog_delay_ms: 8_000,
            ..m_candles("m", catalog(), |_, r| {
                Ok(r.map(daily_candles).unwrap_or_default())
            })
        })
    };

    let candela = Candela::builder()
        .with_connector(slow())
        .provider_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let report = candela
        .download()
        .tickers(["SBER"])
        .period(d(2024, 1, 1), d(2024, 1, 5))
        .run()
        .await
        .unwrap();
    assert!(report.warnings.is_empty());
    assert_eq!(report.response.unwrap().height(), 5);

    let candela = Candela::builder()
        .with_connector(slow())
        .catalog_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let report = candela.download().tickers(["SBER"]).run().await.unwrap();
    assert!(report.response.is_none());
    assert!(matches!(
        &report.warnings[0],
        CandelaError::ProviderTimeout { capability, .. } if capability == "catalog"
    ));
    assert_eq!(report.skipped_tickers(), vec!["SBER"]);
}
