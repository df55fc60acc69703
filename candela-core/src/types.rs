//! Re-export of foundational types from `candela-types`.
// Consolidated re-exports so downstream crates can depend on `candela-core` only

pub use candela_types::{CandelaError, Capability, ConnectorKey};

pub use candela_types::{CandelaConfig, DEFAULT_MAX_CHUNK_SPAN_DAYS, DownloadReport};

pub use candela_types::{Candle, DateRange, NANOS_PER_UNIT, Quotation};

pub use candela_types::{Instrument, InstrumentId, InstrumentKind};

pub use candela_types::{
    CandleRow, CandleTable, InstrumentSeries, PriceColumn, SeriesKey, SeriesPoint, WideTable,
};
