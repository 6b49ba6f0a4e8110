//! Timestamps
//!
//! Coupon validity bounds are absolute instants. A value carrying an offset is converted to the
//! instant it denotes. Naive date-times and bare dates are read as UTC wall-clock time.

use jiff::{Timestamp, civil, tz::TimeZone};
use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

/// Errors raised while parsing a coupon timestamp.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The input is neither an RFC 3339 instant, a naive date-time nor a date.
    #[error("unrecognised timestamp {input:?}: {source}")]
    Unrecognised {
        /// Raw input.
        input: String,

        /// Error from the last parse attempt.
        #[source]
        source: jiff::Error,
    },

    /// A naive value could not be placed on the UTC timeline.
    #[error("timestamp {input:?} is out of range: {source}")]
    OutOfRange {
        /// Raw input.
        input: String,

        /// Conversion error.
        #[source]
        source: jiff::Error,
    },
}

/// Parse a timestamp using the coupon timezone policy.
///
/// Accepted forms, tried in order:
///
/// - `2025-01-01T09:30:00+05:30` / `2025-01-01T04:00:00Z`: converted to that instant
/// - `2025-01-01T09:30:00`: UTC wall-clock time
/// - `2025-01-01`: midnight UTC
///
/// # Errors
///
/// Returns a [`TimestampError`] if none of the accepted forms match.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, TimestampError> {
    let input = input.trim();

    if let Ok(timestamp) = input.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    if let Ok(datetime) = input.parse::<civil::DateTime>() {
        return naive_utc(datetime, input);
    }

    let date = input
        .parse::<civil::Date>()
        .map_err(|source| TimestampError::Unrecognised {
            input: input.to_string(),
            source,
        })?;

    naive_utc(date.to_datetime(civil::Time::midnight()), input)
}

fn naive_utc(datetime: civil::DateTime, input: &str) -> Result<Timestamp, TimestampError> {
    datetime
        .to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|source| TimestampError::OutOfRange {
            input: input.to_string(),
            source,
        })
}

/// Serde adapter for `#[serde(deserialize_with = "...")]` on timestamp fields.
///
/// # Errors
///
/// Propagates the deserializer error, or a custom error when the string is not a timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    parse_timestamp(&raw).map_err(de::Error::custom)
}
