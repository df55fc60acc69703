//! Candela-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod instrument;
mod market;
mod range;
mod reports;
mod table;

pub use capability::Capability;
pub use config::{CandelaConfig, DEFAULT_CATALOG_TIMEOUT, DEFAULT_MAX_CHUNK_SPAN_DAYS};
pub use connector::ConnectorKey;
pub use error::CandelaError;
pub use instrument::{Instrument, InstrumentId, InstrumentKind};
pub use market::{Candle, NANOS_PER_UNIT, Quotation};
pub use range::DateRange;
pub use reports::DownloadReport;
pub use table::{
    CandleRow, CandleTable, InstrumentSeries, PriceColumn, SeriesKey, SeriesPoint, WideTable,
};
