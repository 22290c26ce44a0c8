//! Plain-text export of entries and drafts.
//!
//! Exports are produced on demand and handed to the caller; the service never
//! writes them anywhere itself.

use chrono::{DateTime, Utc};

use super::types::{JournalEntry, UNTITLED};

/// A rendered export: suggested file name plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExport {
    pub filename: String,
    pub body: String,
}

/// Lowercase `title` and replace each run of characters outside `[a-z0-9]`
/// with a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

pub fn human_timestamp(at: DateTime<Utc>) -> String {
    at.format("%A, %B %-d, %Y, %I:%M %p UTC").to_string()
}

/// Render an export for `title` and already-plain `text` stamped at `at`.
pub fn render(title: &str, text: &str, at: DateTime<Utc>) -> TextExport {
    let title = title.trim();
    let slug = slugify(if title.is_empty() { "journal-entry" } else { title });
    let heading = if title.is_empty() { UNTITLED } else { title };

    TextExport {
        filename: format!("{slug}-{}.txt", at.format("%Y-%m-%d")),
        body: format!("{heading}\n{}\n\n{text}", human_timestamp(at)),
    }
}

/// Export a stored entry, stamped with its creation date.
pub fn export_entry(entry: &JournalEntry) -> TextExport {
    let at = entry.timestamp().unwrap_or_else(Utc::now);
    render(&entry.title, &plain_text(&entry.content), at)
}

/// Visible text of HTML-formatted content.
///
/// Tags are dropped; block-level boundaries (`div`, `p`, `br`, `li`) become
/// line breaks and the common character entities are decoded. Content without
/// markup passes through unchanged.
pub fn plain_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                let mut tag = String::new();
                for t in chars.by_ref() {
                    if t == '>' {
                        break;
                    }
                    tag.push(t);
                }
                let name: String = tag
                    .trim_start_matches('/')
                    .chars()
                    .take_while(|ch| ch.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase();
                let opens_block = matches!(name.as_str(), "div" | "p" | "li") && !tag.starts_with('/');
                if (name == "br" || opens_block) && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            '&' => {
                let mut entity = String::new();
                while let Some(&n) = chars.peek() {
                    if !(n.is_ascii_alphanumeric() || n == '#') || entity.len() > 8 {
                        break;
                    }
                    entity.push(n);
                    chars.next();
                }
                let decoded = match entity.as_str() {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "#39" | "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                };
                match (decoded, chars.peek()) {
                    (Some(ch), Some(';')) => {
                        chars.next();
                        out.push(ch);
                    }
                    _ => {
                        out.push('&');
                        out.push_str(&entity);
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
