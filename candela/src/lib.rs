//! Candela downloads daily candles for several instruments and lines their closing
//! prices up in one date-aligned table.
//!
//! Overview
//! - Resolves tickers through a connector's instrument catalog.
//! - Splits long date ranges into chunks that respect the provider's per-request span
//!   limit and fetches them with a per-chunk timeout.
//! - Converts fixed-point candles into decimal `(date, close)` series labelled with the
//!   instrument's display name.
//! - Outer-joins the series on `date` and coalesces chunk columns so each instrument
//!   ends up with exactly one column.
//!
//! Key behaviors and trade-offs
//! - Failed chunks are skipped, never retried; they appear as `ChunkFailed` warnings in
//!   the report. An instrument whose every chunk failed keeps an all-missing column.
//! - Unknown tickers are skipped with an `UnresolvedTicker` warning.
//! - Chunks of one instrument may be fetched concurrently (`max_concurrent_chunks`);
//!   results are always reassembled in chunk order. Instruments are fetched one after
//!   another.
//!
//! Examples
//! Building an orchestrator and downloading a table:
//! ```rust,ignore
//! use std::sync::Arc;
//! use candela::Candela;
//! use candela_tinvest::{TinvestConfig, TinvestConnector};
//!
//! let tinvest = Arc::new(TinvestConnector::new(TinvestConfig::new(token))?);
//! let candela = Candela::builder()
//!     .with_connector(tinvest)
//!     .max_chunk_span_days(350)
//!     .build()?;
//!
//! let report = candela
//!     .download()
//!     .benchmark("MOEX")
//!     .tickers(["SBER", "GAZP"])
//!     .period(start, end)
//!     .run()
//!     .await?;
//! if let Some(table) = report.response.as_ref() {
//!     println!("{table}");
//! }
//! for ticker in report.skipped_tickers() {
//!     eprintln!("skipped {ticker}");
//! }
//! ```
//!
//! Fetching one instrument's series:
//! ```rust,ignore
//! let outcome = candela.fetch_series(&instrument, Some(range)).await?;
//! println!("{} points, {} skipped chunks", outcome.series.len(), outcome.warnings.len());
//! ```
//!
//! See `candela/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Candela, CandelaBuilder};
pub use router::download::DownloadBuilder;
pub use router::history::{ChunkedSeries, SeriesOutcome};
pub use router::util::resolve_tickers;

// Re-export core types for convenience
pub use candela_core::{
    CandelaConfig, CandelaConnector, CandelaError, Candle, CandleRow, CandleTable, Capability,
    DateRange, DownloadReport, Instrument, InstrumentId, InstrumentKind, InstrumentSeries,
    PriceColumn, Quotation, SeriesGroups, SeriesKey, SeriesMerger, SeriesPoint, WideTable,
    coalesce_columns, merge_series,
};

#[cfg(feature = "dataframe")]
pub use candela_core::ToDataFrame;
