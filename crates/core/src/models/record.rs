//! Plain structured records used for persistence
//!
//! Field names are fixed (camelCase). The snake_case names written by
//! earlier planner files are accepted on input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serialized guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    #[serde(alias = "last_name")]
    pub last_name: String,
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Serialized seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub row: u32,
    pub number: u32,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub guest: Option<GuestRecord>,
}

/// Serialized event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub name: String,
    /// ISO-8601 local timestamp
    #[serde(alias = "date_time")]
    pub date_time: String,
    pub location: String,
    #[serde(alias = "num_rows")]
    pub num_rows: u32,
    #[serde(alias = "num_seats_per_row")]
    pub num_seats_per_row: u32,
    pub seats: Vec<SeatRecord>,
    #[serde(alias = "unassigned_guests")]
    pub unassigned_guests: Vec<GuestRecord>,
}

/// Top-level planner document: every event in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerDocument {
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// Decode a record, reporting any missing or mistyped field as malformed
pub(crate) fn decode<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::MalformedRecord(format!("{}: {}", what, e)))
}

/// Parse JSON text, then decode it as a record
pub(crate) fn decode_str<T: DeserializeOwned>(json: &str, what: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    decode(value, what)
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// An explicit offset is accepted and dropped; a bare date means midnight.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(Error::MalformedRecord(format!(
        "dateTime '{}' is not an ISO-8601 timestamp",
        s
    )))
}

/// Format a timestamp the way records store it
pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
