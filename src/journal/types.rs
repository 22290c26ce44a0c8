//! Core journal type definitions.
//!
//! Defines [`JournalEntry`] (a persisted record), [`RawEntry`] (the lenient
//! on-disk shape accepted during load), [`JournalPrompt`] and its
//! [`PromptCategory`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Title given to entries submitted or loaded without one.
pub const UNTITLED: &str = "Untitled Entry";

/// A journal record. Field order matches the persisted file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// UUID assigned at creation, never reused.
    pub id: String,
    pub title: String,
    /// Raw or HTML-formatted text.
    pub content: String,
    /// ISO 8601 creation timestamp, immutable.
    pub date: String,
}

/// An entry as read from storage, before repair.
///
/// Only `id` is mandatory. Missing or empty `title` and `date` are filled in by
/// [`RawEntry::repair`]; the stored record is left as it was.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawEntry {
    /// Fill in missing fields: `date` becomes `now`, `title` becomes [`UNTITLED`].
    pub fn repair(self, now: &str) -> JournalEntry {
        JournalEntry {
            id: self.id,
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            content: self.content.unwrap_or_default(),
            date: self
                .date
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| now.to_string()),
        }
    }
}

impl JournalEntry {
    /// Parsed creation timestamp, or `None` if `date` is not RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Format a timestamp the way entries store it: `2025-01-17T09:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sort entries newest first. Entries with unparseable dates go last, in their
/// original relative order.
pub fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Writing prompt categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    Reflection,
    Gratitude,
    Growth,
    Goals,
    Creativity,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 5] = [
        Self::Reflection,
        Self::Gratitude,
        Self::Growth,
        Self::Goals,
        Self::Creativity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reflection => "reflection",
            Self::Gratitude => "gratitude",
            Self::Growth => "growth",
            Self::Goals => "goals",
            Self::Creativity => "creativity",
        }
    }
}

impl std::fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reflection" => Ok(Self::Reflection),
            "gratitude" => Ok(Self::Gratitude),
            "growth" => Ok(Self::Growth),
            "goals" => Ok(Self::Goals),
            "creativity" => Ok(Self::Creativity),
            _ => Err(format!("unknown prompt category: {s}")),
        }
    }
}

/// A short writing suggestion. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalPrompt {
    pub id: String,
    pub question: String,
    pub category: PromptCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            title: "t".into(),
            content: "c".into(),
            date: date.into(),
        }
    }

    #[test]
    fn repair_fills_missing_title_and_date() {
        let raw: RawEntry = serde_json::from_str(r#"{"id":"a","content":"hello"}"#).unwrap();
        let repaired = raw.repair("2025-01-01T00:00:00.000Z");
        assert_eq!(repaired.title, UNTITLED);
        assert_eq!(repaired.date, "2025-01-01T00:00:00.000Z");
        assert_eq!(repaired.content, "hello");
    }

    #[test]
    fn repair_treats_empty_strings_as_missing() {
        let raw: RawEntry =
            serde_json::from_str(r#"{"id":"a","title":"","content":"x","date":""}"#).unwrap();
        let repaired = raw.repair("2025-02-02T00:00:00.000Z");
        assert_eq!(repaired.title, UNTITLED);
        assert_eq!(repaired.date, "2025-02-02T00:00:00.000Z");
    }

    #[test]
    fn repair_keeps_present_fields() {
        let raw: RawEntry = serde_json::from_str(
            r#"{"id":"a","title":"Morning","content":"x","date":"2024-05-05T10:00:00.000Z"}"#,
        )
        .unwrap();
        let repaired = raw.repair("2025-02-02T00:00:00.000Z");
        assert_eq!(repaired.title, "Morning");
        assert_eq!(repaired.date, "2024-05-05T10:00:00.000Z");
    }

    #[test]
    fn record_without_id_is_rejected() {
        assert!(serde_json::from_str::<RawEntry>(r#"{"title":"x"}"#).is_err());
    }

    #[test]
    fn sort_puts_newest_first_and_bad_dates_last() {
        let mut entries = vec![
            entry("old", "2024-01-01T00:00:00.000Z"),
            entry("bad", "last tuesday"),
            entry("new", "2025-06-01T12:00:00.000Z"),
            entry("mid", "2024-06-01T00:00:00+02:00"),
        ];
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "bad"]);
    }

    #[test]
    fn iso_timestamp_uses_millis_and_z() {
        let at = DateTime::parse_from_rfc3339("2025-01-17T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(iso_timestamp(at), "2025-01-17T09:30:00.000Z");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Gratitude".parse::<PromptCategory>(), Ok(PromptCategory::Gratitude));
        assert!("hobbies".parse::<PromptCategory>().is_err());
    }

    #[test]
    fn prompt_serializes_category_lowercase() {
        let prompt = JournalPrompt {
            id: "x".into(),
            question: "q".into(),
            category: PromptCategory::Growth,
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["category"], "growth");
    }
}
