use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{CandelaError, InstrumentSeries, PriceColumn, WideTable};

/// Header reserved for the date column.
pub const DATE_LABEL: &str = "date";

/// Running outer join of instrument series on `date`.
///
/// - The first series pushed into an empty merger is adopted as-is.
/// - Every later series is outer-joined on exact date equality: dates present on only
///   one side get missing values on the other side.
/// - Rows are kept ascending by date. Duplicate dates join many-to-many, so an
///   upstream duplicate multiplies rows instead of being collapsed.
/// - Series are never deduplicated: a repeated name keeps its own column and gets a
///   `_<n>` label (`_2`, `_3`, ...). The column's `key` and `name` are untouched.
#[derive(Debug, Clone, Default)]
pub struct SeriesMerger {
    dates: Vec<NaiveDate>,
    columns: Vec<PriceColumn>,
}

impl SeriesMerger {
    /// An empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first series is pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows accumulated so far.
    #[must_use]
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Join `series` into the accumulator.
    pub fn push(&mut self, series: InstrumentSeries) {
        let label = unique_label(&series.name, &self.columns);
        let InstrumentSeries { key, name, points } = series;

        if self.columns.is_empty() {
            let mut points = points;
            points.sort_by_key(|p| p.date);
            self.dates = points.iter().map(|p| p.date).collect();
            self.columns.push(PriceColumn {
                key,
                name,
                label,
                values: points.into_iter().map(|p| Some(p.price)).collect(),
            });
            return;
        }

        let mut sides: BTreeMap<NaiveDate, (Vec<usize>, Vec<Decimal>)> = BTreeMap::new();
        for (row, date) in self.dates.iter().enumerate() {
            sides.entry(*date).or_default().0.push(row);
        }
        for p in &points {
            sides.entry(p.date).or_default().1.push(p.price);
        }

        let width = self.columns.len();
        let mut dates = Vec::with_capacity(self.dates.len().max(points.len()));
        let mut left: Vec<Vec<Option<Decimal>>> = vec![Vec::with_capacity(dates.capacity()); width];
        let mut right: Vec<Option<Decimal>> = Vec::with_capacity(dates.capacity());

        for (date, (rows, prices)) in sides {
            let rows: Vec<Option<usize>> = if rows.is_empty() {
                vec![None]
            } else {
                rows.into_iter().map(Some).collect()
            };
            let prices: Vec<Option<Decimal>> = if prices.is_empty() {
                vec![None]
            } else {
                prices.into_iter().map(Some).collect()
            };
            for row in &rows {
                for price in &prices {
                    dates.push(date);
                    for (out, col) in left.iter_mut().zip(&self.columns) {
                        out.push(row.and_then(|r| col.values[r]));
                    }
                    right.push(*price);
                }
            }
        }

        for (col, values) in self.columns.iter_mut().zip(left) {
            col.values = values;
        }
        self.dates = dates;
        self.columns.push(PriceColumn {
            key,
            name,
            label,
            values: right,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = self.dates.len(),
            columns = self.columns.len(),
            "merged series"
        );
    }

    /// The joined table.
    ///
    /// # Errors
    /// Returns `CandelaError::Data` only if the accumulator's columns went out of
    /// step with its dates.
    pub fn finish(self) -> Result<WideTable, CandelaError> {
        WideTable::from_parts(self.dates, self.columns)
    }
}

/// Outer-join all `series` in order.
///
/// # Errors
/// See [`SeriesMerger::finish`].
pub fn merge_series<I>(series: I) -> Result<WideTable, CandelaError>
where
    I: IntoIterator<Item = InstrumentSeries>,
{
    let mut merger = SeriesMerger::new();
    for s in series {
        merger.push(s);
    }
    merger.finish()
}

pub(crate) fn unique_label(name: &str, columns: &[PriceColumn]) -> String {
    let taken: HashSet<&str> = columns
        .iter()
        .map(|c| c.label.as_str())
        .chain(core::iter::once(DATE_LABEL))
        .collect();
    if !taken.contains(name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{name}_{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| format!("{name}_{}", columns.len() + 1))
}
