//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `split`: plan request chunks that respect a provider's span limit
//! - `convert`: turn raw provider candles into decimal rows
//! - `merge`: outer-join per-instrument series into a date-aligned wide table
//! - `coalesce`: collapse same-instrument columns and partial series by backward fill
/// Collapse duplicate columns and chunk partials of one instrument.
pub mod coalesce;
/// Candle conversion from fixed-point quotations to decimal rows.
pub mod convert;
/// Outer-join merge of per-instrument series.
pub mod merge;
/// Date-range chunk planning.
pub mod split;
