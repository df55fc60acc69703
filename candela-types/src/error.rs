use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::range::DateRange;

/// Unified error type for the candela workspace.
///
/// This covers range validation, malformed provider payloads, connector-tagged
/// request failures, not-found conditions, and per-chunk failures recorded while
/// assembling a series.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandelaError {
    /// A date range whose start lies after its end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested (inclusive) start date.
        start: NaiveDate,
        /// Requested (inclusive) end date.
        end: NaiveDate,
    },

    /// A candle record is missing a required field or carries an invalid quotation.
    #[error("malformed candle: {0}")]
    MalformedCandle(String),

    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "candles").
        capability: String,
    },

    /// Issues with the returned or expected data that are not candle-shaped.
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A request to the upstream API failed.
    #[error("{connector} request failed: {msg}")]
    Request {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "share catalog".
        what: String,
    },

    /// A requested ticker has no listing in the instrument catalog.
    #[error("no instrument for ticker {ticker}")]
    UnresolvedTicker {
        /// Ticker as requested by the caller.
        ticker: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "candles", "catalog").
        capability: String,
    },

    /// One chunk of an instrument's history was skipped.
    #[error("chunk {} for {instrument} skipped: {source}", fmt_chunk(.range.as_ref()))]
    ChunkFailed {
        /// Ticker of the instrument being fetched.
        instrument: String,
        /// The chunk that failed; `None` for an unbounded request.
        range: Option<DateRange>,
        /// Underlying failure.
        source: Box<CandelaError>,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

fn fmt_chunk(range: Option<&DateRange>) -> String {
    range.map_or_else(|| "(unbounded)".to_string(), ToString::to_string)
}

impl CandelaError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Request` error with the connector name and message.
    pub fn request(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Request {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `UnresolvedTicker` error.
    pub fn unresolved_ticker(ticker: impl Into<String>) -> Self {
        Self::UnresolvedTicker {
            ticker: ticker.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: wrap a failure as a skipped chunk of `instrument`.
    pub fn chunk_failed(instrument: impl Into<String>, range: Option<DateRange>, source: Self) -> Self {
        Self::ChunkFailed {
            instrument: instrument.into(),
            range,
            source: Box::new(source),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Capability absence, not-found conditions and unresolved tickers are benign. Chunk failures are
    /// classified by their underlying cause.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::UnresolvedTicker { .. } => {
                false
            }
            Self::ChunkFailed { source, .. } => source.is_actionable(),
            _ => true,
        }
    }

    /// Unwrap nested `ChunkFailed` wrappers down to the root cause.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::ChunkFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
