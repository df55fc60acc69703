mod common;
use candela::Candela;
use chrono::NaiveDate;
use tracing_subscriber::fmt::format::FmtSpan;

// Suggested: RUST_LOG=info,candela=debug,candela_tinvest=debug
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let connector = common::get_connector();
    let candela = Candela::builder()
        .with_connector(connector)
        .max_chunk_span_days(350)
        .max_concurrent_chunks(2)
        .build()?;

    // Three years: each instrument is fetched in four chunks.
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).ok_or("bad end date")?;

    let report = candela
        .download()
        .benchmark("MOEX")
        .tickers(["SBER", "SU26238RMFS4", "TMOS", "FAIL"])
        .period(start, end)
        .run()
        .await?;

    if let Some(table) = report.response.as_ref() {
        println!("{} rows x {} columns", table.height(), table.num_columns());
        for col in table.columns() {
            let filled = col.values.iter().filter(|v| v.is_some()).count();
            println!("{:<40} {filled:>5} prices", col.label);
        }
    }
    for ticker in report.skipped_tickers() {
        eprintln!("skipped ticker {ticker}");
    }
    for w in report.failed_chunks() {
        eprintln!("skipped chunk: {w}");
    }

    Ok(())
}
