use chrono::Datelike;
use polars::prelude::{Column, DataFrame, DataType, PolarsError, PolarsResult};
use rust_decimal::prelude::ToPrimitive;

use crate::WideTable;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Conversion into a `polars` [`DataFrame`].
pub trait ToDataFrame {
    /// Build a data frame from `self`.
    ///
    /// # Errors
    /// Returns a `PolarsError` if the frame cannot be assembled.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for WideTable {
    /// A `date` column of dtype `Date` followed by one nullable `Float64` column per
    /// price column, named by its label. Missing values become nulls.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let days: Vec<i32> = self
            .dates()
            .iter()
            .map(|d| d.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
            .collect();
        let mut columns = Vec::with_capacity(self.num_columns() + 1);
        columns.push(Column::new("date".into(), days).cast(&DataType::Date)?);

        for col in self.columns() {
            let values = col
                .values
                .iter()
                .map(|v| match v {
                    Some(d) => d.to_f64().map(Some).ok_or_else(|| {
                        PolarsError::ComputeError(
                            format!("price {d} in '{}' does not fit f64", col.label).into(),
                        )
                    }),
                    None => Ok(None),
                })
                .collect::<PolarsResult<Vec<Option<f64>>>>()?;
            columns.push(Column::new(col.label.as_str().into(), values));
        }
        DataFrame::new(columns)
    }
}
