use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::models::Memory;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("ISO date pattern is valid")
});

/// Phrases that ask about the state of things at an earlier point.
const PAST_CUES: &[&str] = &["as of", "by ", "before "];

/// Temporal intent of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    /// No time reference; use everything.
    Present,
    /// Keep memories created at or before `cutoff`.
    Past { cutoff: DateTime<Utc> },
    /// A past cue without a parsable date.
    PastAmbiguous,
    /// Keep memories created within `[start, end]`; `end` open when absent.
    Range {
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    },
}

impl TimeMode {
    /// Detect the time mode of a question.
    ///
    /// `Range` takes the first two dates in left-to-right order, unsorted.
    /// A question that names the later date first gets an inverted range.
    /// The `"from"`/`"to"` checks are plain substring matches.
    pub fn detect(question: &str) -> Self {
        let lower = question.to_lowercase();
        let dates = extract_dates(question);

        if lower.contains("from") && lower.contains("to") && dates.len() >= 2 {
            return Self::Range {
                start: dates[0],
                end: Some(dates[1]),
            };
        }

        if PAST_CUES.iter().any(|cue| lower.contains(cue)) {
            return match dates.first() {
                Some(cutoff) => Self::Past { cutoff: *cutoff },
                None => Self::PastAmbiguous,
            };
        }

        Self::Present
    }

    /// Whether a time filter or time qualifier applies to this mode.
    pub fn is_time_scoped(&self) -> bool {
        !matches!(self, Self::Present)
    }

    pub fn admits(&self, created_at: &DateTime<Utc>) -> bool {
        match self {
            Self::Past { cutoff } => created_at <= cutoff,
            Self::Range { start, end } => {
                created_at >= start && end.map_or(true, |end| *created_at <= end)
            }
            Self::Present | Self::PastAmbiguous => true,
        }
    }

    /// Apply the mode's time filter, preserving order.
    pub fn filter<'a>(&self, memories: &'a [Memory]) -> Vec<&'a Memory> {
        memories.iter().filter(|m| self.admits(&m.created_at)).collect()
    }
}

impl std::fmt::Display for TimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Past { .. } => write!(f, "past"),
            Self::PastAmbiguous => write!(f, "past_ambiguous"),
            Self::Range { .. } => write!(f, "range"),
        }
    }
}

/// ISO dates found in `text`, as midnight UTC. Matches that are not real
/// calendar dates (e.g. `2024-02-30`) are skipped.
pub fn extract_dates(text: &str) -> Vec<DateTime<Utc>> {
    ISO_DATE
        .find_iter(text)
        .filter_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .filter_map(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .collect()
}
