use std::sync::Arc;

use candela_core::{
    CandelaConnector, CandelaError, Candle, Capability, DateRange, Instrument, InstrumentSeries,
    SeriesKey, candles_to_table, plan_chunks,
};
use chrono::TimeDelta;
use futures::stream::{self, StreamExt};

use crate::Candela;
use crate::core::tag_err;

/// Per-chunk series of one instrument plus the chunks that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedSeries {
    /// One series per chunk that was fetched and converted, in chunk order.
    pub partials: Vec<InstrumentSeries>,
    /// One `ChunkFailed` per skipped chunk.
    pub warnings: Vec<CandelaError>,
}

/// Concatenated series of one instrument plus the chunks that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesOutcome {
    /// `(date, close)` points of all successful chunks in chunk order.
    pub series: InstrumentSeries,
    /// One `ChunkFailed` per skipped chunk.
    pub warnings: Vec<CandelaError>,
}

impl ChunkedSeries {
    /// Concatenate the partials of `instrument` in chunk order; no sorting or dedup.
    #[must_use]
    pub fn concat(self, instrument: &Instrument) -> SeriesOutcome {
        let mut series = InstrumentSeries::empty_for(instrument);
        for partial in self.partials {
            series.points.extend(partial.points);
        }
        SeriesOutcome {
            series,
            warnings: self.warnings,
        }
    }
}

type ChunkResult = (Option<DateRange>, Result<Vec<Candle>, CandelaError>);

impl Candela {
    fn max_span(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.cfg.max_chunk_span_days))
    }

    async fn fetch_chunk(
        connector: Arc<dyn CandelaConnector>,
        instrument: &Instrument,
        chunk: Option<DateRange>,
        timeout: std::time::Duration,
    ) -> ChunkResult {
        let name = connector.name();
        let res = match connector.as_candle_provider() {
            Some(provider) => {
                Self::provider_call_with_timeout(
                    name,
                    Capability::Candles.as_str(),
                    timeout,
                    provider.candles(&instrument.id, chunk),
                )
                .await
            }
            None => Err(CandelaError::unsupported(Capability::Candles.as_str())),
        };
        (chunk, res.map_err(|e| tag_err(name, e)))
    }

    /// Fetch daily candles for `instrument` chunk by chunk and keep one `(date, close)`
    /// series per chunk.
    ///
    /// Behavior:
    /// - The range is split into chunks of at most `max_chunk_span_days`; with no range
    ///   a single unbounded request is made.
    /// - Up to `max_concurrent_chunks` requests are in flight; results are reassembled
    ///   in chunk order.
    /// - A chunk whose request fails, times out, or carries a malformed candle is
    ///   skipped and recorded as a `ChunkFailed` warning. Failed chunks are not retried.
    /// - Every partial is labelled with the instrument's display name and keyed by its
    ///   identifier.
    ///
    /// # Errors
    /// Returns `Unsupported` if no registered connector serves candles, and
    /// `InvalidArg` if the configured chunk span is unusable.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::history::fetch_partials",
            skip(self, instrument),
            fields(ticker = %instrument.ticker, id = %instrument.id, range = ?range),
        )
    )]
    pub async fn fetch_partials(
        &self,
        instrument: &Instrument,
        range: Option<DateRange>,
    ) -> Result<ChunkedSeries, CandelaError> {
        let plan = plan_chunks(range, self.max_span())?;
        let connector = self.candle_connector()?;
        let timeout = self.cfg.provider_timeout;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            chunks = plan.len(),
            connector = connector.name(),
            "planned candle chunks"
        );

        let results: Vec<ChunkResult> = stream::iter(plan.into_iter().map(|chunk| {
            Self::fetch_chunk(Arc::clone(&connector), instrument, chunk, timeout)
        }))
        .buffered(self.cfg.max_concurrent_chunks.max(1))
        .collect()
        .await;

        let key = SeriesKey::from(&instrument.id);
        let mut partials = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (chunk, res) in results {
            match res.and_then(|candles| candles_to_table(&candles)) {
                Ok(table) => partials.push(table.close_series(key.clone(), instrument.name.clone())),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        ticker = %instrument.ticker,
                        chunk = ?chunk,
                        error = %e,
                        "skipping candle chunk"
                    );
                    warnings.push(CandelaError::chunk_failed(
                        instrument.ticker.clone(),
                        chunk,
                        e,
                    ));
                }
            }
        }
        Ok(ChunkedSeries { partials, warnings })
    }

    /// Fetch the `(date, close)` series of one instrument across all chunks.
    ///
    /// Same pipeline as [`Candela::fetch_partials`], with chunk results concatenated in
    /// chunk order. An instrument whose every chunk failed yields an empty series and
    /// one warning per chunk.
    ///
    /// # Errors
    /// See [`Candela::fetch_partials`].
    pub async fn fetch_series(
        &self,
        instrument: &Instrument,
        range: Option<DateRange>,
    ) -> Result<SeriesOutcome, CandelaError> {
        Ok(self.fetch_partials(instrument, range).await?.concat(instrument))
    }
}
