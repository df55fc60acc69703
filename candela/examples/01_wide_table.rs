mod common;
use candela::Candela;
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = common::get_connector();
    let candela = Candela::builder().with_connector(connector).build()?;

    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2023, 1, 13).ok_or("bad end date")?;

    let report = candela
        .download()
        .benchmark("MOEX")
        .tickers(["SBER", "GAZP", "UNKNOWN"])
        .period(start, end)
        .run()
        .await?;

    match report.response.as_ref() {
        Some(table) => println!("{table}"),
        None => eprintln!("no data returned"),
    }

    if !report.warnings.is_empty() {
        eprintln!("warnings:");
        for w in &report.warnings {
            eprintln!("- {w}");
        }
    }

    Ok(())
}
