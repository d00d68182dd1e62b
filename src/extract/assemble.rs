//! Record assembly
//!
//! Merges the structured and fallback passes field by field (structured
//! wins), normalizes every value, and applies defaults so the output record
//! is always complete.

use crate::config::{ExtractionConfig, MAX_DESCRIPTION_CHARS};
use crate::event::{ParsedEventData, UNTITLED_EVENT};
use crate::extract::{EventStart, ExtractedFields, Field};
use crate::importer::collapse_whitespace;
use crate::url::EventUrl;
use std::fmt;
use url::Url;

/// Where a field's final value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Structured,
    Fallback,
    /// Nothing usable was found
    Default,
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structured => "structured",
            Self::Fallback => "fallback",
            Self::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// Per-field origin of an assembled record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    entries: Vec<(Field, FieldSource)>,
}

impl Provenance {
    /// Origin of `field`
    pub fn source(&self, field: Field) -> FieldSource {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map_or(FieldSource::Default, |(_, source)| *source)
    }

    /// Number of fields that came from `source`
    pub fn count(&self, source: FieldSource) -> usize {
        self.entries.iter().filter(|(_, s)| *s == source).count()
    }

    pub fn entries(&self) -> &[(Field, FieldSource)] {
        &self.entries
    }
}

/// Builds the final record from both passes
///
/// `url` and `source` always come from the classified input URL. Text fields
/// are whitespace-collapsed, the description keeps its line breaks and is
/// truncated to `description_max_chars` characters, and the image is resolved
/// to an absolute http(s) URL against the page.
pub fn assemble(
    structured: &ExtractedFields,
    fallback: &ExtractedFields,
    event_url: &EventUrl,
    config: &ExtractionConfig,
) -> (ParsedEventData, Provenance) {
    let mut record = ParsedEventData::empty(event_url.input.clone(), event_url.platform);
    let mut entries = Vec::with_capacity(Field::all().len());

    let (title, source) = pick(
        structured.title.as_deref().and_then(normalize_line),
        fallback.title.as_deref().and_then(normalize_line),
    );
    record.title = title.unwrap_or_else(|| UNTITLED_EVENT.to_string());
    entries.push((Field::Title, source));

    let max_chars = config.description_max_chars.clamp(1, MAX_DESCRIPTION_CHARS);
    let (description, source) = pick(
        structured
            .description
            .as_deref()
            .and_then(|d| normalize_description(d, max_chars)),
        fallback
            .description
            .as_deref()
            .and_then(|d| normalize_description(d, max_chars)),
    );
    record.description = description.unwrap_or_default();
    entries.push((Field::Description, source));

    let (start, source): (Option<EventStart>, _) = pick(structured.start, fallback.start);
    if let Some(start) = start {
        record.date = start.date_string();
        record.time = start.time_string();
    }
    entries.push((Field::Start, source));

    let (location, source) = pick(
        structured.location.as_deref().and_then(normalize_line),
        fallback.location.as_deref().and_then(normalize_line),
    );
    record.location = location.unwrap_or_default();
    entries.push((Field::Location, source));

    let (organizer, source) = pick(
        structured.organizer.as_deref().and_then(normalize_line),
        fallback.organizer.as_deref().and_then(normalize_line),
    );
    record.organizer = organizer.unwrap_or_default();
    entries.push((Field::Organizer, source));

    let (attendees, source) = pick(structured.attendees, fallback.attendees);
    record.attendees = attendees;
    entries.push((Field::Attendees, source));

    let (image, source) = pick(
        structured
            .image
            .as_deref()
            .and_then(|i| resolve_image(&event_url.url, i)),
        fallback
            .image
            .as_deref()
            .and_then(|i| resolve_image(&event_url.url, i)),
    );
    record.image = image.unwrap_or_default();
    entries.push((Field::Image, source));

    (record, Provenance { entries })
}

/// Clears values that would normalize to nothing in [`assemble`]
///
/// Run on the structured pass before computing its missing fields, so a
/// blank title or a `data:` image still sends the field to the fallback
/// cascade.
pub fn retain_usable(fields: &ExtractedFields, page: &Url) -> ExtractedFields {
    fn usable_line(value: &Option<String>) -> Option<String> {
        value.clone().filter(|v| normalize_line(v).is_some())
    }

    ExtractedFields {
        title: usable_line(&fields.title),
        description: fields
            .description
            .clone()
            .filter(|d| normalize_description(d, MAX_DESCRIPTION_CHARS).is_some()),
        start: fields.start,
        location: usable_line(&fields.location),
        organizer: usable_line(&fields.organizer),
        attendees: fields.attendees,
        image: fields
            .image
            .clone()
            .filter(|i| resolve_image(page, i).is_some()),
    }
}

fn pick<T>(structured: Option<T>, fallback: Option<T>) -> (Option<T>, FieldSource) {
    match (structured, fallback) {
        (Some(value), _) => (Some(value), FieldSource::Structured),
        (None, Some(value)) => (Some(value), FieldSource::Fallback),
        (None, None) => (None, FieldSource::Default),
    }
}

fn normalize_line(raw: &str) -> Option<String> {
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Collapses whitespace within lines, drops blank lines, then truncates to
/// `max_chars` characters
fn normalize_description(raw: &str, max_chars: usize) -> Option<String> {
    let text = raw
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let truncated: String = text.chars().take(max_chars).collect();
    let truncated = truncated.trim_end();
    if truncated.is_empty() {
        None
    } else {
        Some(truncated.to_string())
    }
}

/// Resolves a possibly relative image reference against the page URL
///
/// Only http(s) results are kept; `data:` URIs and other schemes are dropped.
fn resolve_image(page: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match page.join(raw) {
        Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => Some(resolved.to_string()),
        Ok(resolved) => {
            tracing::debug!("Dropping image with scheme '{}'", resolved.scheme());
            None
        }
        Err(e) => {
            tracing::debug!("Dropping unresolvable image '{}': {}", raw, e);
            None
        }
    }
}
