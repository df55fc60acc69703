//! candela-core
//!
//! Core types, traits, and utilities shared across the candela ecosystem.
//!
//! - `types`: re-exports of the shared data transfer objects.
//! - `connector`: the `CandelaConnector` trait and its capability traits.
//! - `timeseries`: chunk planning, candle conversion, wide-table merge and coalescing.
//!
//! Everything in `timeseries` is synchronous and pure; only the connector traits are
//! async (via `async-trait`), so connectors can be driven by any executor the
//! orchestrator picks.
#![warn(missing_docs)]

/// Connector capability traits and the primary `CandelaConnector` interface.
pub mod connector;
/// Optional `polars` export of wide tables.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Time-series utilities for chunking, conversion, merging, and coalescing.
pub mod timeseries;
pub mod types;

pub use connector::CandelaConnector;
#[cfg(feature = "dataframe")]
pub use dataframe::ToDataFrame;
pub use timeseries::coalesce::{SeriesGroups, backfill_series, coalesce_columns};
pub use timeseries::convert::{candle_to_row, candles_to_table};
pub use timeseries::merge::{SeriesMerger, merge_series};
pub use timeseries::split::{default_max_span, plan_chunks, split_date_range};
pub use types::*;
