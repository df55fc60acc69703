use std::sync::Arc;

use candela::{Candela, CandelaError};
use candela_tinvest::{TinvestConfig, TinvestConnector};
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::helpers::{GAZP_FIGI, MOEX_FIGI, SBER_FIGI, d};

const SERVICE: &str = "/tinkoff.public.invest.api.contract.v1";

fn candle(day: &str, units: i64) -> Value {
    json!({
        "open": {"units": units.to_string(), "nano": 0},
        "high": {"units": units.to_string(), "nano": 0},
        "low": {"units": units.to_string(), "nano": 0},
        "close": {"units": units.to_string(), "nano": 500000000},
        "volume": "1000",
        "time": format!("{day}T07:00:00Z"),
        "isComplete": true
    })
}

async fn mock_catalog(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{SERVICE}.InstrumentsService/Shares"));
            then.status(200).json_body(json!({"instruments": [
                {"figi": MOEX_FIGI, "ticker": "MOEX", "name": "Московская Биржа"},
                {"figi": SBER_FIGI, "ticker": "SBER", "name": "Сбер Банк"},
                {"figi": GAZP_FIGI, "ticker": "GAZP", "name": "Газпром"}
            ]}));
        })
        .await;
    for section in ["Bonds", "Etfs"] {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(format!("{SERVICE}.InstrumentsService/{section}"));
                then.status(200).json_body(json!({"instruments": []}));
            })
            .await;
    }
}

async fn mock_candles(server: &MockServer, figi: &str, status: u16, body: Value) {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{SERVICE}.MarketDataService/GetCandles"))
                .json_body(json!({
                    "figi": figi,
                    "from": "2024-01-08T00:00:00Z",
                    "to": "2024-01-11T00:00:00Z",
                    "interval": "CANDLE_INTERVAL_DAY"
                }));
            then.status(status).json_body(body);
        })
        .await;
}

fn candela_for(server: &MockServer) -> Candela {
    let cfg = TinvestConfig::new("t.token").with_base_url(server.base_url());
    let tinvest = Arc::new(TinvestConnector::new(cfg).unwrap());
    Candela::builder().with_connector(tinvest).build().unwrap()
}

#[tokio::test]
async fn rest_connector_feeds_the_wide_table() {
    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    mock_candles(
        &server,
        MOEX_FIGI,
        200,
        json!({"candles": [candle("2024-01-08", 200), candle("2024-01-09", 201), candle("2024-01-10", 202)]}),
    )
    .await;
    mock_candles(
        &server,
        SBER_FIGI,
        200,
        json!({"candles": [candle("2024-01-09", 270), candle("2024-01-10", 271)]}),
    )
    .await;

    let report = candela_for(&server)
        .download()
        .benchmark("MOEX")
        .tickers(["SBER", "NOPE"])
        .period(d(2024, 1, 8), d(2024, 1, 10))
        .run()
        .await
        .unwrap();

    assert_eq!(report.skipped_tickers(), vec!["NOPE"]);
    let table = report.response.unwrap();
    assert_eq!(
        table.labels().collect::<Vec<_>>(),
        vec!["Московская Биржа", "Сбер Банк"]
    );
    assert_eq!(table.height(), 3);
    assert_eq!(
        table.value("Московская Биржа", d(2024, 1, 8)),
        Some(Decimal::new(2005, 1))
    );
    assert_eq!(table.value("Сбер Банк", d(2024, 1, 8)), None);
    assert_eq!(
        table.value("Сбер Банк", d(2024, 1, 10)),
        Some(Decimal::new(2715, 1))
    );
}

#[tokio::test]
async fn http_failure_becomes_a_chunk_warning() {
    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    mock_candles(
        &server,
        GAZP_FIGI,
        200,
        json!({"candles": [candle("2024-01-08", 160)]}),
    )
    .await;
    mock_candles(&server, SBER_FIGI, 500, json!({"message": "internal"})).await;

    let report = candela_for(&server)
        .download()
        .tickers(["SBER", "GAZP"])
        .period(d(2024, 1, 8), d(2024, 1, 10))
        .run()
        .await
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        CandelaError::ChunkFailed {
            instrument, source, ..
        } => {
            assert_eq!(instrument, "SBER");
            assert!(matches!(
                source.as_ref(),
                CandelaError::Request { connector, .. } if connector == "candela-tinvest"
            ));
        }
        other => panic!("expected ChunkFailed, got {other:?}"),
    }
    let table = report.response.unwrap();
    assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Сбер Банк", "Газпром"]);
    assert!(table.column("Сбер Банк").unwrap().values.iter().all(Option::is_none));
}
