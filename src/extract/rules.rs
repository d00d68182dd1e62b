//! Per-platform fallback rules
//!
//! Each platform gets a static strategy: for every field, an ordered cascade
//! of lookups tried until one yields a usable value. Platform-specific
//! selectors come first, generic Open Graph / Twitter / `<title>` lookups
//! last. Selectors track live page markup and are expected to drift; the
//! HTML fixtures under `tests/fixtures/` pin the shapes they were written
//! against.

use crate::extract::Field;
use crate::importer::EventDocument;
use crate::url::Platform;

/// A single fallback lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Collapsed text of the first matching element
    Text(&'static str),
    /// Attribute of the first matching element
    Attr(&'static str, &'static str),
    /// `datetime` attribute of the first match, else its text
    Time(&'static str),
    /// `<meta>` content keyed by `property` or `name`
    Meta(&'static str),
    /// The `<title>` element
    DocumentTitle,
}

impl Rule {
    /// Runs the lookup against `doc`, returning the raw (uncoerced) value
    pub fn lookup(&self, doc: &EventDocument) -> Option<String> {
        match *self {
            Self::Text(css) => doc.select_text(css),
            Self::Attr(css, attr) => doc.select_attr(css, attr),
            Self::Time(css) => doc.time_value(css),
            Self::Meta(key) => doc.meta_content(key),
            Self::DocumentTitle => doc.title(),
        }
    }
}

/// Fallback cascades for one platform
#[derive(Debug)]
pub struct PlatformStrategy {
    pub platform: Platform,
    /// Branding appended to page titles, stripped from title candidates
    pub title_suffixes: &'static [&'static str],
    /// Markers after which a title candidate is cut (ticket/date boilerplate)
    pub title_cut_markers: &'static [&'static str],
    pub title: &'static [Rule],
    pub description: &'static [Rule],
    pub start: &'static [Rule],
    pub location: &'static [Rule],
    pub organizer: &'static [Rule],
    pub attendees: &'static [Rule],
    pub image: &'static [Rule],
}

impl PlatformStrategy {
    /// Strategy for `platform`
    pub fn for_platform(platform: Platform) -> &'static PlatformStrategy {
        match platform {
            Platform::Meetup => &MEETUP,
            Platform::Eventbrite => &EVENTBRITE,
            Platform::Luma => &LUMA,
        }
    }

    /// Cascade for `field`, in priority order
    pub fn cascade(&self, field: Field) -> &'static [Rule] {
        match field {
            Field::Title => self.title,
            Field::Description => self.description,
            Field::Start => self.start,
            Field::Location => self.location,
            Field::Organizer => self.organizer,
            Field::Attendees => self.attendees,
            Field::Image => self.image,
        }
    }

    /// Removes platform branding from a title candidate
    ///
    /// # Example
    ///
    /// ```
    /// use event_import::extract::PlatformStrategy;
    /// use event_import::Platform;
    ///
    /// let meetup = PlatformStrategy::for_platform(Platform::Meetup);
    /// assert_eq!(meetup.clean_title("Rust Night | Meetup"), "Rust Night");
    /// ```
    pub fn clean_title(&self, raw: &str) -> String {
        let mut title = raw.trim();

        for suffix in self.title_suffixes {
            if let Some(stripped) = title.strip_suffix(suffix) {
                title = stripped.trim_end();
                break;
            }
        }

        for marker in self.title_cut_markers {
            if let Some(index) = title.find(marker) {
                title = title[..index].trim_end();
            }
        }

        title.to_string()
    }
}

const GENERIC_DESCRIPTION: [Rule; 3] = [
    Rule::Meta("og:description"),
    Rule::Meta("description"),
    Rule::Meta("twitter:description"),
];

const GENERIC_IMAGE: [Rule; 2] = [Rule::Meta("og:image"), Rule::Meta("twitter:image")];

pub static MEETUP: PlatformStrategy = PlatformStrategy {
    platform: Platform::Meetup,
    title_suffixes: &[" | Meetup"],
    title_cut_markers: &[],
    title: &[
        Rule::Text(r#"h1[data-testid="event-title"]"#),
        Rule::Text("h1.event-title"),
        Rule::Text("main h1"),
        Rule::Meta("og:title"),
        Rule::Meta("twitter:title"),
        Rule::DocumentTitle,
    ],
    description: &[
        Rule::Text(r#"[data-testid="event-description"]"#),
        Rule::Text("#event-details"),
        Rule::Text(".event-description"),
        GENERIC_DESCRIPTION[0],
        GENERIC_DESCRIPTION[1],
        GENERIC_DESCRIPTION[2],
    ],
    start: &[
        Rule::Time(r#"[data-testid="event-when-info"] time"#),
        Rule::Time("time[datetime]"),
        Rule::Meta("event:start_time"),
        Rule::Time("time"),
    ],
    location: &[
        Rule::Text(r#"[data-testid="location-info"]"#),
        Rule::Text(r#"[data-event-label="event-location"]"#),
        Rule::Text(".venueDisplay-venue-address"),
        Rule::Text("address"),
    ],
    organizer: &[
        Rule::Text(r#"[data-event-label="hosted-by"]"#),
        Rule::Text(r#"[data-testid="event-host"]"#),
        Rule::Text(r#"[data-event-label="group-name"]"#),
        Rule::Text(".event-host"),
    ],
    attendees: &[
        Rule::Text(r#"[data-testid="attendees-count"]"#),
        Rule::Text("#attendees h2"),
        Rule::Text(".attendees-count"),
    ],
    image: &[
        Rule::Attr(r#"[data-testid="event-description-image"] img"#, "src"),
        Rule::Attr("img.event-image", "src"),
        GENERIC_IMAGE[0],
        GENERIC_IMAGE[1],
    ],
};

pub static EVENTBRITE: PlatformStrategy = PlatformStrategy {
    platform: Platform::Eventbrite,
    title_suffixes: &[" | Eventbrite"],
    title_cut_markers: &[" Tickets, "],
    title: &[
        Rule::Text("h1.event-title"),
        Rule::Text(r#"[data-testid="event-title"]"#),
        Rule::Text("main h1"),
        Rule::Meta("og:title"),
        Rule::Meta("twitter:title"),
        Rule::DocumentTitle,
    ],
    description: &[
        Rule::Text(".event-description__content"),
        Rule::Text(r#"[data-testid="description"]"#),
        Rule::Text("#event-description"),
        Rule::Text(".structured-content-rich-text"),
        GENERIC_DESCRIPTION[0],
        GENERIC_DESCRIPTION[1],
        GENERIC_DESCRIPTION[2],
    ],
    start: &[
        Rule::Time("time.start-date"),
        Rule::Time(r#"[data-testid="event-date"] time"#),
        Rule::Meta("event:start_time"),
        Rule::Text(".date-info__full-datetime"),
        Rule::Time("time[datetime]"),
        Rule::Time("time"),
    ],
    location: &[
        Rule::Text(".location-info__address-text"),
        Rule::Text(r#"[data-testid="location-address"]"#),
        Rule::Text(".location-info__address"),
        Rule::Text("address"),
    ],
    organizer: &[
        Rule::Text(".organizer-listing-info__name"),
        Rule::Text(r#"[data-testid="organizer-name"]"#),
        Rule::Text(".descriptive-organizer-info-mobile__name"),
        Rule::Text(".organizer-name"),
    ],
    attendees: &[
        Rule::Text(r#"[data-testid="attendee-count"]"#),
        Rule::Text(".attendee-count"),
    ],
    image: &[
        Rule::Attr(r#"[data-testid="hero-image"] img"#, "src"),
        Rule::Attr("picture img", "src"),
        GENERIC_IMAGE[0],
        GENERIC_IMAGE[1],
    ],
};

pub static LUMA: PlatformStrategy = PlatformStrategy {
    platform: Platform::Luma,
    title_suffixes: &[" · Luma", " | Luma", " · Lu.ma"],
    title_cut_markers: &[],
    title: &[
        Rule::Text("h1.title"),
        Rule::Text(r#"[class*="event-title"]"#),
        Rule::Text("main h1"),
        Rule::Meta("og:title"),
        Rule::Meta("twitter:title"),
        Rule::DocumentTitle,
    ],
    description: &[
        Rule::Text(r#"[class*="event-about"]"#),
        Rule::Text(".spark-content"),
        Rule::Text(r#"[class*="description"]"#),
        GENERIC_DESCRIPTION[0],
        GENERIC_DESCRIPTION[1],
        GENERIC_DESCRIPTION[2],
    ],
    start: &[
        Rule::Time("time[datetime]"),
        Rule::Text(r#"[class*="event-time"]"#),
        Rule::Text(r#"[class*="date-time"]"#),
        Rule::Time("time"),
    ],
    location: &[
        Rule::Text(r#"[class*="location-name"]"#),
        Rule::Text(r#"[class*="event-location"]"#),
        Rule::Text("address"),
    ],
    organizer: &[
        Rule::Text(r#"[class*="host-name"]"#),
        Rule::Text(r#"[class*="hosts"] .name"#),
        Rule::Text(r#"[class*="organizer"]"#),
    ],
    attendees: &[
        Rule::Text(r#"[class*="guest-count"]"#),
        Rule::Text(r#"[class*="guests-string"]"#),
        Rule::Text(r#"[class*="attendee-count"]"#),
    ],
    image: &[
        Rule::Attr(r#"img[class*="cover"]"#, "src"),
        GENERIC_IMAGE[0],
        GENERIC_IMAGE[1],
    ],
};
