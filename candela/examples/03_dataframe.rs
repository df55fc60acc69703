mod common;
#[cfg(feature = "dataframe")]
use candela::{Candela, ToDataFrame};
#[cfg(feature = "dataframe")]
use chrono::NaiveDate;

#[cfg(feature = "dataframe")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = common::get_connector();
    let candela = Candela::builder().with_connector(connector).build()?;

    let start = NaiveDate::from_ymd_opt(2023, 3, 1).ok_or("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2023, 3, 31).ok_or("bad end date")?;
    let report = candela
        .download()
        .tickers(["SBER", "GAZP"])
        .period(start, end)
        .run()
        .await?;

    if let Some(table) = report.response.as_ref() {
        let df = table.to_dataframe()?;
        println!(
            "DataFrame shape: {} rows x {} cols",
            df.height(),
            df.width()
        );
        println!("{df}");
    }
    Ok(())
}

#[cfg(not(feature = "dataframe"))]
fn main() {
    eprintln!("This example requires the 'dataframe' feature. Skipping.");
}
