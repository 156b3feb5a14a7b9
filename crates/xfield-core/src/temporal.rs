//! # Temporal Types — Offset and Zoned Date-Times
//!
//! chrono covers local dates, local date-times, and offset date-times
//! directly. A zoned date-time additionally carries a region identifier
//! (`Europe/Paris`) next to the offset in force at that instant; this module
//! defines [`ZonedDateTime`] for that case and the ordering rules both
//! offset-bearing kinds share.
//!
//! ## Ordering
//!
//! Offset-bearing values order by instant first. Two values denoting the same
//! instant with different offsets are still distinct: the tie is broken by
//! local date-time, and for zoned values finally by zone id. This keeps the
//! ordering total and consistent with equality.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// A date-time with an offset and the named zone that produced it.
///
/// The zone id is carried verbatim; resolving zone rules is left to the
/// producer of the value.
#[derive(Debug, Clone)]
pub struct ZonedDateTime {
    date_time: DateTime<FixedOffset>,
    zone: String,
}

impl ZonedDateTime {
    /// Create a zoned date-time from an offset date-time and a zone id.
    pub fn new(date_time: DateTime<FixedOffset>, zone: impl Into<String>) -> Self {
        Self {
            date_time,
            zone: zone.into(),
        }
    }

    /// The offset date-time in force for this value.
    pub fn date_time(&self) -> &DateTime<FixedOffset> {
        &self.date_time
    }

    /// The zone id, e.g. `Europe/Paris`.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Local wall-clock date-time in the value's own offset.
    pub fn local(&self) -> NaiveDateTime {
        self.date_time.naive_local()
    }
}

impl PartialEq for ZonedDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ZonedDateTime {}

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_offset(&self.date_time, &other.date_time)
            .then_with(|| self.zone.cmp(&other.zone))
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.date_time.to_rfc3339(), self.zone)
    }
}

/// Order two offset date-times by instant, then by local date-time.
pub fn compare_offset(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> Ordering {
    a.cmp(b)
        .then_with(|| a.naive_local().cmp(&b.naive_local()))
}

/// Render a local date-time as ISO-8601 with a `T` separator.
///
/// Fractional seconds are printed only when present.
pub fn format_local(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
