//! Field extraction
//!
//! # Components
//!
//! - `structured`: JSON-LD Event nodes (highest precedence)
//! - `rules` / `fallback`: per-platform selector and meta-tag cascades for
//!   whatever structured data left empty
//! - `datetime`: start date/time coercion shared by both paths
//! - `assemble`: merges both passes into the final normalized record

mod assemble;
mod datetime;
mod fallback;
mod rules;
mod structured;

pub use assemble::{assemble, retain_usable, FieldSource, Provenance};
pub use datetime::{parse_loose, parse_start_date, EventStart};
pub use fallback::extract_fallback;
pub use rules::{PlatformStrategy, Rule};
pub use structured::extract_structured;

/// Extractable event fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    /// Date and time, always resolved together
    Start,
    Location,
    Organizer,
    Attendees,
    Image,
}

impl Field {
    /// Returns all fields in record order
    pub fn all() -> [Self; 7] {
        [
            Self::Title,
            Self::Description,
            Self::Start,
            Self::Location,
            Self::Organizer,
            Self::Attendees,
            Self::Image,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Start => "start",
            Self::Location => "location",
            Self::Organizer => "organizer",
            Self::Attendees => "attendees",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw values found by one extraction pass, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventStart>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub attendees: Option<u32>,
    pub image: Option<String>,
}

impl ExtractedFields {
    /// Returns true if the pass found a usable value for `field`
    pub fn has(&self, field: Field) -> bool {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            Field::Title => filled(&self.title),
            Field::Description => filled(&self.description),
            Field::Start => self.start.is_some(),
            Field::Location => filled(&self.location),
            Field::Organizer => filled(&self.organizer),
            Field::Attendees => self.attendees.is_some(),
            Field::Image => filled(&self.image),
        }
    }

    /// Fields this pass left empty
    pub fn missing(&self) -> Vec<Field> {
        Field::all()
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }

    /// Number of fields this pass filled
    pub fn filled_count(&self) -> usize {
        Field::all().len() - self.missing().len()
    }
}
