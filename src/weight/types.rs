//! Core data types for weight histories
//!
//! - `WeightEntry`: a single historical measurement
//! - `SortOrder`: how a caller's list of entries is ordered
//! - `ParseTagError`: error for the closed tag sets used across the crate

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::units::{deserialize_unit, WeightUnit};

/// A single weight measurement
///
/// Immutable once created. The chart never mutates entries; it derives
/// canonical weights from them on every render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    /// Identifier within a history (may be empty for ad-hoc entries)
    #[serde(default)]
    pub id: String,
    /// When the measurement was taken
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    /// Measured value in `unit`
    pub weight: f64,
    /// Unit of `weight`; missing or unknown tags mean kilograms
    #[serde(default, deserialize_with = "deserialize_unit")]
    pub unit: WeightUnit,
}

impl WeightEntry {
    /// Create an entry without an id
    pub fn new(date: DateTime<Utc>, weight: f64, unit: WeightUnit) -> Self {
        Self {
            id: String::new(),
            date,
            weight,
            unit,
        }
    }

    /// Create an entry for a calendar day (stamped at noon UTC)
    pub fn on_day(year: i32, month: u32, day: u32, weight: f64, unit: WeightUnit) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(12, 0, 0)?
            .and_utc();
        Some(Self::new(date, weight, unit))
    }

    /// Builder method: set the id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Weight converted to kilograms
    pub fn weight_kg(&self) -> f64 {
        self.unit.to_kg(self.weight)
    }

    /// Timestamp in milliseconds since the epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.date.timestamp_millis()
    }
}

/// How the caller's list of entries is ordered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// The opposite order
    pub fn reversed(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(ParseTagError::new("sort order", s)),
        }
    }
}

/// A value outside one of the crate's closed tag sets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: {value}")]
pub struct ParseTagError {
    kind: &'static str,
    value: String,
}

impl ParseTagError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Parse a measurement date
///
/// Accepts RFC 3339, a few common date-time layouts, and plain dates
/// (stamped at noon UTC so the calendar day is stable across time zones).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    let date_formats = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(12, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("Could not parse date: {}", raw)))
}
