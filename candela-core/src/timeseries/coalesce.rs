use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::merge::{merge_series, unique_label};
use crate::{CandelaError, Instrument, InstrumentSeries, PriceColumn, SeriesKey, WideTable};

/// Collapse every group of same-instrument columns into one column.
///
/// - Columns are grouped by their provenance `key`; labels are never parsed.
/// - Groups keep the order in which their first column appears.
/// - Each output cell is the first non-missing value among the group's columns,
///   scanned left to right; it stays missing only if all of them are missing.
/// - The surviving column is labelled with its `name` (suffixed only if two distinct
///   instruments share a name).
///
/// Running it twice yields the same table.
///
/// # Errors
/// Returns `CandelaError::Data` if `table` is ragged (cannot happen for tables built
/// through [`WideTable::from_parts`]).
pub fn coalesce_columns(table: WideTable) -> Result<WideTable, CandelaError> {
    let (dates, columns) = table.into_parts();

    let mut order: Vec<SeriesKey> = Vec::new();
    let mut groups: HashMap<SeriesKey, PriceColumn> = HashMap::new();
    for col in columns {
        match groups.get_mut(&col.key) {
            Some(acc) => {
                for (slot, v) in acc.values.iter_mut().zip(col.values) {
                    if slot.is_none() {
                        *slot = v;
                    }
                }
            }
            None => {
                order.push(col.key.clone());
                groups.insert(col.key.clone(), col);
            }
        }
    }

    let mut out: Vec<PriceColumn> = Vec::with_capacity(order.len());
    for key in order {
        if let Some(mut col) = groups.remove(&key) {
            col.label = unique_label(&col.name, &out);
            out.push(col);
        }
    }
    WideTable::from_parts(dates, out)
}

/// Fold the chunk partials of one instrument into a single series.
///
/// For every date the first partial (in the given order) that has it wins; later
/// partials only fill dates the earlier ones lack. Output points are ascending by
/// date. With no partials the result is an empty series.
#[must_use]
pub fn backfill_series(
    key: SeriesKey,
    name: String,
    partials: Vec<InstrumentSeries>,
) -> InstrumentSeries {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for partial in partials {
        for p in partial.points {
            by_date.entry(p.date).or_insert(p.price);
        }
    }
    InstrumentSeries::from_pairs(key, name, by_date)
}

#[derive(Debug, Clone)]
struct Group {
    key: SeriesKey,
    name: String,
    partials: Vec<InstrumentSeries>,
}

/// Ordered map from instrument to its chunk partials.
///
/// Instruments keep their registration order and partials keep their push order, so
/// backfilling sees chunks chronologically and the wide table lists instruments in
/// request order.
#[derive(Debug, Clone, Default)]
pub struct SeriesGroups {
    groups: Vec<Group>,
    index: HashMap<SeriesKey, usize>,
}

impl SeriesGroups {
    /// No instruments yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: SeriesKey, name: String) -> &mut Group {
        let idx = match self.index.get(&key) {
            Some(idx) => *idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(key.clone(), idx);
                self.groups.push(Group {
                    key,
                    name,
                    partials: Vec::new(),
                });
                idx
            }
        };
        &mut self.groups[idx]
    }

    /// Register `instrument` without any partials.
    ///
    /// An instrument whose every chunk failed still yields an all-missing column.
    pub fn register(&mut self, instrument: &Instrument) {
        self.slot(SeriesKey::from(&instrument.id), instrument.name.clone());
    }

    /// Append one chunk partial to its instrument's group.
    pub fn push(&mut self, partial: InstrumentSeries) {
        let group = self.slot(partial.key.clone(), partial.name.clone());
        group.partials.push(partial);
    }

    /// Whether `key` has been registered.
    #[must_use]
    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.index.contains_key(key)
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no instrument was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// One backfilled series per instrument, in registration order.
    #[must_use]
    pub fn into_series(self) -> Vec<InstrumentSeries> {
        self.groups
            .into_iter()
            .map(|g| backfill_series(g.key, g.name, g.partials))
            .collect()
    }

    /// Backfill each instrument, outer-join them on `date`, then coalesce.
    ///
    /// # Errors
    /// Propagates [`merge_series`] and [`coalesce_columns`] failures.
    pub fn into_wide_table(self) -> Result<WideTable, CandelaError> {
        coalesce_columns(merge_series(self.into_series())?)
    }
}
