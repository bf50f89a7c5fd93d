use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::clock::locale::ClockLocale;
use crate::foundation::error::{ClockError, ClockResult};

/// Text shown when a timestamp cannot be formatted.
pub const FALLBACK_TEXT: &str = "xx";

/// Where the UTC offset for a timestamp comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OffsetSource {
    Fixed(UtcOffset),
    /// Local offset at each timestamp, or `fallback` when it cannot be determined.
    Local { fallback: UtcOffset },
}

/// Formats timestamps as a 12-hour `h:mm a` clock string.
///
/// Formatting never fails from the caller's point of view: any fault yields [`FALLBACK_TEXT`] so
/// the render loop always has something to draw.
#[derive(Clone, Debug)]
pub struct TimeFormatter {
    offset: OffsetSource,
    locale: ClockLocale,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(UtcOffset::UTC, ClockLocale::english())
    }
}

impl TimeFormatter {
    /// Formatter for a fixed UTC offset and locale.
    pub fn new(offset: UtcOffset, locale: ClockLocale) -> Self {
        Self {
            offset: OffsetSource::Fixed(offset),
            locale,
        }
    }

    /// Formatter following the local time zone, resolved per timestamp so DST and zone changes
    /// show up in a long-running engine.
    ///
    /// The local offset is not always determinable (for example in multi-threaded processes on
    /// some Unix platforms). The offset found now, or UTC, is used then.
    pub fn local(locale: ClockLocale) -> Self {
        let fallback = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(err) => {
                tracing::warn!(%err, "local UTC offset unavailable, clock falls back to UTC");
                UtcOffset::UTC
            }
        };
        Self {
            offset: OffsetSource::Local { fallback },
            locale,
        }
    }

    /// Formatter for the process's local time zone and locale.
    pub fn system() -> Self {
        Self::local(ClockLocale::system())
    }

    /// UTC offset applied to `timestamp_millis`.
    pub fn offset_at(&self, timestamp_millis: i64) -> UtcOffset {
        match self.offset {
            OffsetSource::Fixed(offset) => offset,
            OffsetSource::Local { fallback } => utc_datetime(timestamp_millis)
                .ok()
                .and_then(|at| UtcOffset::local_offset_at(at).ok())
                .unwrap_or(fallback),
        }
    }

    /// Format `timestamp_millis` (Unix epoch milliseconds), or [`FALLBACK_TEXT`] on failure.
    pub fn format(&self, timestamp_millis: i64) -> String {
        match self.try_format(timestamp_millis) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(timestamp_millis, %err, "clock text fell back");
                FALLBACK_TEXT.to_owned()
            }
        }
    }

    fn try_format(&self, timestamp_millis: i64) -> ClockResult<String> {
        let offset = self.offset_at(timestamp_millis);
        let offset_nanos = i128::from(offset.whole_seconds()) * 1_000_000_000;
        let local_nanos = i128::from(timestamp_millis) * 1_000_000 + offset_nanos;
        // Wall-clock fields are read from a UTC value already shifted by the offset.
        let local = OffsetDateTime::from_unix_timestamp_nanos(local_nanos).map_err(|e| {
            ClockError::validation(format!("timestamp {timestamp_millis} out of range: {e}"))
        })?;
        let hour_minute = local
            .format(format_description!("[hour repr:12 padding:none]:[minute]"))
            .map_err(|e| ClockError::render(format!("format clock text: {e}")))?;
        Ok(self.locale.decorate(&hour_minute, local.hour() >= 12))
    }
}

fn utc_datetime(timestamp_millis: i64) -> ClockResult<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp_millis) * 1_000_000).map_err(
        |e| ClockError::validation(format!("timestamp {timestamp_millis} out of range: {e}")),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/clock/format.rs"]
mod tests;
