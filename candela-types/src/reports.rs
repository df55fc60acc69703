//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::CandelaError;
use crate::table::WideTable;

/// Summary of a multi-instrument download.
///
/// Wraps the merged [`WideTable`] when at least one ticker resolved, plus every
/// non-fatal issue met along the way: unresolved tickers and skipped chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DownloadReport {
    /// Date-aligned table with one column per resolved instrument.
    pub response: Option<WideTable>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<CandelaError>,
}

impl DownloadReport {
    /// Tickers that had no catalog listing and were skipped.
    ///
    /// Other not-found warnings, such as a missing catalog, are not tickers and are
    /// left out.
    #[must_use]
    pub fn skipped_tickers(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                CandelaError::UnresolvedTicker { ticker } => Some(ticker.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Warnings describing chunks that were skipped.
    pub fn failed_chunks(&self) -> impl Iterator<Item = &CandelaError> + '_ {
        self.warnings
            .iter()
            .filter(|w| matches!(w, CandelaError::ChunkFailed { .. }))
    }
}
