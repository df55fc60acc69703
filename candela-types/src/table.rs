//! Tabular shapes produced by the pipeline: converted candle rows, per-instrument
//! `(date, price)` series, and the date-aligned wide table.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CandelaError;
use crate::instrument::{Instrument, InstrumentId};

/// Provenance of a price column: which instrument it was fetched for.
///
/// Columns are grouped by this key, never by their label text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(String);

impl SeriesKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&InstrumentId> for SeriesKey {
    fn from(id: &InstrumentId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One converted candle: a trading day with decimal prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRow {
    /// Trading day (candle time truncated to its UTC date).
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume in lots.
    pub volume: i64,
}

/// Row-oriented table of converted candles, in the order they were received.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandleTable {
    /// Rows in input order.
    pub rows: Vec<CandleRow>,
}

impl CandleTable {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no candles were converted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep `date` and `close`, labelling the price with `name`.
    #[must_use]
    pub fn close_series(&self, key: SeriesKey, name: impl Into<String>) -> InstrumentSeries {
        InstrumentSeries {
            key,
            name: name.into(),
            points: self
                .rows
                .iter()
                .map(|r| SeriesPoint {
                    date: r.date,
                    price: r.close,
                })
                .collect(),
        }
    }
}

/// A single `(date, price)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Trading day.
    pub date: NaiveDate,
    /// Price on that day.
    pub price: Decimal,
}

/// Two-column `(date, <name>)` table for one instrument.
///
/// Dates are expected to be unique but need not be ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSeries {
    /// Provenance of the series.
    pub key: SeriesKey,
    /// Display name used as the price column label.
    pub name: String,
    /// Observations in arrival order.
    pub points: Vec<SeriesPoint>,
}

impl InstrumentSeries {
    /// Empty series for `instrument`, labelled with its display name.
    #[must_use]
    pub fn empty_for(instrument: &Instrument) -> Self {
        Self {
            key: SeriesKey::from(&instrument.id),
            name: instrument.name.clone(),
            points: Vec::new(),
        }
    }

    /// Build a series from `(date, price)` pairs.
    pub fn from_pairs<I>(key: impl Into<SeriesKey>, name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        Self {
            key: key.into(),
            name: name.into(),
            points: pairs
                .into_iter()
                .map(|(date, price)| SeriesPoint { date, price })
                .collect(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dates in arrival order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }
}

/// One price column of a [`WideTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceColumn {
    /// Provenance of the column.
    pub key: SeriesKey,
    /// Logical (display) name shared by every column of the same instrument.
    pub name: String,
    /// Unique header; equals `name` unless a collision forced a `_<n>` suffix.
    pub label: String,
    /// One entry per table row; `None` marks a missing value.
    pub values: Vec<Option<Decimal>>,
}

/// Date-aligned table: one `date` column plus N price columns.
///
/// Every column holds exactly one value slot per row, also when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawWideTable")]
pub struct WideTable {
    dates: Vec<NaiveDate>,
    columns: Vec<PriceColumn>,
}

#[derive(Deserialize)]
struct RawWideTable {
    dates: Vec<NaiveDate>,
    columns: Vec<PriceColumn>,
}

impl TryFrom<RawWideTable> for WideTable {
    type Error = CandelaError;

    fn try_from(raw: RawWideTable) -> Result<Self, Self::Error> {
        Self::from_parts(raw.dates, raw.columns)
    }
}

impl WideTable {
    /// Assemble a table from its parts.
    ///
    /// # Errors
    /// Returns `CandelaError::Data` if any column's length differs from `dates`.
    pub fn from_parts(dates: Vec<NaiveDate>, columns: Vec<PriceColumn>) -> Result<Self, CandelaError> {
        if let Some(bad) = columns.iter().find(|c| c.values.len() != dates.len()) {
            return Err(CandelaError::Data(format!(
                "column '{}' has {} values for {} rows",
                bad.label,
                bad.values.len(),
                dates.len()
            )));
        }
        Ok(Self { dates, columns })
    }

    /// Split into `(dates, columns)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<NaiveDate>, Vec<PriceColumn>) {
        (self.dates, self.columns)
    }

    /// The `date` column.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Price columns in table order.
    #[must_use]
    pub fn columns(&self) -> &[PriceColumn] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Number of price columns (the `date` column is not counted).
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has neither rows nor columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.columns.is_empty()
    }

    /// Column headers, `date` excluded.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Look up a column by its header.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<&PriceColumn> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Values of the first row dated `date`, in column order.
    #[must_use]
    pub fn row(&self, date: NaiveDate) -> Option<Vec<Option<Decimal>>> {
        let idx = self.dates.iter().position(|d| *d == date)?;
        Some(self.columns.iter().map(|c| c.values[idx]).collect())
    }

    /// Value of column `label` on the first row dated `date`.
    #[must_use]
    pub fn value(&self, label: &str, date: NaiveDate) -> Option<Decimal> {
        let idx = self.dates.iter().position(|d| *d == date)?;
        self.column(label).and_then(|c| c.values[idx])
    }
}

impl fmt::Display for WideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                c.values
                    .iter()
                    .map(|v| v.map_or_else(|| "NaN".to_string(), |d| d.normalize().to_string()))
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, col)| {
                col.iter()
                    .map(String::len)
                    .chain(core::iter::once(c.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<10}", "date")?;
        for (c, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", c.label, w = *w)?;
        }
        writeln!(f)?;
        for (row, date) in self.dates.iter().enumerate() {
            write!(f, "{date:<10}")?;
            for (col, w) in cells.iter().zip(&widths) {
                write!(f, "  {:>w$}", col[row], w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
