use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::record::{DecodeError, EventRecord};

#[derive(Debug, Error)]
#[error("invalid window: start {start} must be before end {end}")]
pub struct InvalidWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Closed time interval `[start, end]` the extraction is bounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidWindow> {
        if start >= end {
            return Err(InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Outcome of draining one object's record stream against a window.
#[derive(Debug)]
pub enum ObjectVerdict {
    /// Every record predates the window; nothing to emit. Possible despite
    /// listing-time pruning because the key name only encodes the END of the
    /// object's range.
    EndsBeforeWindow,
    /// The first record already postdates the window end. Records within an
    /// object are non-decreasing in time and listing order correlates with
    /// time, so the caller should stop consuming further keys entirely.
    BeginsAfterWindow,
    /// Records matching the window and wanted kind, in stream order.
    Drained(Vec<EventRecord>),
}

/// Single pass over an object's line-delimited records, applying the
/// time-window and event-kind predicate.
///
/// Any decode failure abandons the whole object: the archive writes objects
/// atomically, so a bad line means the object is corrupt, not that one event
/// is. No partial-line salvage is attempted.
pub fn drain_object<I>(
    lines: I,
    window: &TimeWindow,
    wanted_kind: &str,
) -> Result<ObjectVerdict, DecodeError>
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut matched = Vec::new();
    let mut first = true;
    let mut last_ts: Option<DateTime<Utc>> = None;
    let mut line_no = 0usize;

    for line in lines {
        let line = line?;
        line_no += 1;

        if line.trim().is_empty() {
            continue;
        }

        let record = EventRecord::from_json_line(line_no, &line)?;
        let ts = record.timestamp;

        if first {
            first = false;
            if ts > window.end {
                return Ok(ObjectVerdict::BeginsAfterWindow);
            }
        }

        if record.kind == wanted_kind && window.contains(ts) {
            matched.push(record);
        }

        last_ts = Some(ts);
    }

    match last_ts {
        Some(ts) if ts < window.start => Ok(ObjectVerdict::EndsBeforeWindow),
        _ => Ok(ObjectVerdict::Drained(matched)),
    }
}
