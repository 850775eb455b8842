//! Wire DTOs and enums for all risk domain entities.
//!
//! Shapes match the backend's camelCase JSON contract verbatim; numeric ids
//! are backend-assigned and passed through unchanged.

pub mod action;
pub mod bowtie;
pub mod enums;
pub mod risk;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Lenient decoder for optional date fields.
///
/// The backend emits plain dates for some fields and full timestamps for
/// others, depending on the endpoint. Anything unparseable decodes to
/// `None` with a warning rather than failing the payload.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_backend_date))
}

pub(crate) fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    // Timestamps without a zone suffix also occur in the wild.
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    tracing::warn!(value = raw, "unparseable date from backend, treating as absent");
    None
}
