use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{MnemosyneError, Result};

pub type Metadata = HashMap<String, serde_json::Value>;

/// Offset layouts that RFC 3339 parsing does not cover.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive layouts accepted in addition to RFC 3339. Values without an offset are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 with an offset (normalized to UTC), naive date-times and
/// bare `YYYY-MM-DD` dates (midnight).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| MnemosyneError::InvalidTimestamp(value.to_string()))
}

/// Render a timestamp the way it is shown in answers and summaries.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter so stores written with naive timestamps still load.
pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw))
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Kind of statement a memory records. Classification is first-match-wins
/// in declaration order, with `Fact` as the fallback.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Belief,
    Decision,
    Reflection,
    #[default]
    Fact,
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Belief => write!(f, "belief"),
            Self::Decision => write!(f, "decision"),
            Self::Reflection => write!(f, "reflection"),
            Self::Fact => write!(f, "fact"),
        }
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "belief" => Ok(Self::Belief),
            "decision" => Ok(Self::Decision),
            "reflection" => Ok(Self::Reflection),
            "fact" => Ok(Self::Fact),
            _ => Err(format!("Unknown memory type: {s}")),
        }
    }
}

/// Ingestion profile. Only `Journal` filters anything today.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IngestProfile {
    #[default]
    Default,
    Journal,
    Research,
}

impl IngestProfile {
    /// Whether a candidate of the given type survives this profile.
    pub fn keeps(&self, memory_type: MemoryType) -> bool {
        match self {
            Self::Journal => memory_type != MemoryType::Fact,
            Self::Default | Self::Research => true,
        }
    }
}

impl std::fmt::Display for IngestProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Journal => write!(f, "journal"),
            Self::Research => write!(f, "research"),
        }
    }
}

impl std::str::FromStr for IngestProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "journal" => Ok(Self::Journal),
            "research" => Ok(Self::Research),
            _ => Err(format!("Unknown ingest profile: {s}")),
        }
    }
}
