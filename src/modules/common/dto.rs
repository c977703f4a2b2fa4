use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// serializes a date as a ISO 8601 UTC string with millisecond precision,
/// eg: `2024-02-01T13:45:10.123Z`
pub fn iso_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
