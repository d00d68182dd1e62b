//! The normalized event record handed back to the caller

use crate::url::Platform;
use serde::Serialize;

/// Title used when no extractor could find one
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Event details extracted from a platform page
///
/// String fields that could not be extracted are empty rather than absent,
/// so a form can be pre-filled field by field. `attendees` is the exception:
/// an unknown count is `None`, which is different from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEventData {
    /// Event title, never empty
    pub title: String,

    /// Event description, at most 500 characters
    pub description: String,

    /// Start date as `YYYY-MM-DD`, or empty
    pub date: String,

    /// Start time as 24-hour `HH:MM`, or empty
    pub time: String,

    /// Venue name or address, or empty
    pub location: String,

    /// Hosting group or person, or empty
    pub organizer: String,

    /// Attendee/guest count when the page exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,

    /// Absolute cover image URL, or empty
    pub image: String,

    /// The URL the caller asked to import
    pub url: String,

    /// Platform the page was imported from
    pub source: Platform,
}

impl ParsedEventData {
    /// Creates an empty record for a URL, with only the defaults filled in
    pub fn empty(url: impl Into<String>, source: Platform) -> Self {
        Self {
            title: UNTITLED_EVENT.to_string(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            organizer: String::new(),
            attendees: None,
            image: String::new(),
            url: url.into(),
            source,
        }
    }

    /// Returns true when extraction found nothing beyond the defaults
    pub fn is_bare(&self) -> bool {
        self.title == UNTITLED_EVENT
            && self.description.is_empty()
            && self.date.is_empty()
            && self.location.is_empty()
            && self.organizer.is_empty()
            && self.attendees.is_none()
            && self.image.is_empty()
    }
}
