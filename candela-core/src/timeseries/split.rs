use chrono::{Days, TimeDelta};

use crate::{CandelaError, DEFAULT_MAX_CHUNK_SPAN_DAYS, DateRange};

/// The default per-request span limit (350 days).
#[must_use]
pub fn default_max_span() -> TimeDelta {
    TimeDelta::days(i64::from(DEFAULT_MAX_CHUNK_SPAN_DAYS))
}

fn whole_days(max_span: TimeDelta) -> Result<u64, CandelaError> {
    let days = max_span.num_days();
    if TimeDelta::days(days) != max_span {
        return Err(CandelaError::InvalidArg(format!(
            "chunk span must be a whole number of days, got {max_span}"
        )));
    }
    u64::try_from(days).map_err(|_| {
        CandelaError::InvalidArg(format!("chunk span must not be negative, got {max_span}"))
    })
}

/// Split a closed date range into request-sized chunks.
///
/// - Chunks are returned in chronological order and cover `range` exactly once.
/// - Each chunk satisfies `end - start <= max_span`; the next chunk starts the day
///   after the previous one ends, so consecutive chunks never share a date.
/// - The final chunk is clamped to `range.end()`.
/// - A single-day range yields exactly one chunk equal to the range.
///
/// The chunk count is `ceil(range.num_days() / (max_span_days + 1))`.
///
/// # Errors
/// Returns `CandelaError::InvalidArg` if `max_span` is negative or not a whole
/// number of days.
pub fn split_date_range(
    range: DateRange,
    max_span: TimeDelta,
) -> Result<Vec<DateRange>, CandelaError> {
    let step = whole_days(max_span)?;
    let days = u64::try_from(range.num_days()).unwrap_or(1);
    let expected = days.div_ceil(step.saturating_add(1));
    let mut chunks = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));

    let mut start = range.start();
    loop {
        let end = start
            .checked_add_days(Days::new(step))
            .map_or(range.end(), |e| e.min(range.end()));
        chunks.push(DateRange::new(start, end)?);
        if end >= range.end() {
            break;
        }
        match end.succ_opt() {
            Some(next) => start = next,
            None => break,
        }
    }
    Ok(chunks)
}

/// Plan the chunks for an optional range.
///
/// With no range the caller is asking for "everything available"; that is a single
/// unbounded request (`vec![None]`) and is never split.
///
/// # Errors
/// Propagates the span validation of [`split_date_range`].
pub fn plan_chunks(
    range: Option<DateRange>,
    max_span: TimeDelta,
) -> Result<Vec<Option<DateRange>>, CandelaError> {
    match range {
        None => Ok(vec![None]),
        Some(r) => Ok(split_date_range(r, max_span)?
            .into_iter()
            .map(Some)
            .collect()),
    }
}
