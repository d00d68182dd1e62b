//! Selector and meta-tag fallback extraction
//!
//! Only fields the structured pass left empty are looked up. For each one the
//! platform cascade is walked in order; a raw value that fails coercion (an
//! unparseable date, a count without digits) is discarded and the cascade
//! moves on to the next rule.

use crate::config::TimezonePolicy;
use crate::extract::datetime::parse_loose;
use crate::extract::rules::PlatformStrategy;
use crate::extract::{ExtractedFields, Field};
use crate::importer::EventDocument;
use once_cell::sync::Lazy;
use regex::Regex;

/// First run of digits, allowing thousands separators
static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}(?:,\d{3})+|\d+").unwrap());

/// Fills the `missing` fields from page markup
pub fn extract_fallback(
    doc: &EventDocument,
    strategy: &PlatformStrategy,
    missing: &[Field],
    policy: TimezonePolicy,
) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    for field in missing {
        match field {
            Field::Title => {
                fields.title = first_match(doc, strategy, *field, |raw| {
                    non_empty(strategy.clean_title(&raw))
                })
            }
            Field::Description => {
                fields.description = first_match(doc, strategy, *field, non_empty)
            }
            Field::Start => {
                fields.start = first_match(doc, strategy, *field, |raw| parse_loose(&raw, policy))
            }
            Field::Location => fields.location = first_match(doc, strategy, *field, non_empty),
            Field::Organizer => fields.organizer = first_match(doc, strategy, *field, non_empty),
            Field::Attendees => {
                fields.attendees = first_match(doc, strategy, *field, |raw| parse_count(&raw))
            }
            Field::Image => fields.image = first_match(doc, strategy, *field, non_empty),
        }
    }

    tracing::debug!(
        "{} fallback filled {} of {} missing field(s)",
        strategy.platform,
        fields.filled_count(),
        missing.len()
    );

    fields
}

/// Walks the cascade for `field` until `coerce` accepts a value
fn first_match<T>(
    doc: &EventDocument,
    strategy: &PlatformStrategy,
    field: Field,
    coerce: impl Fn(String) -> Option<T>,
) -> Option<T> {
    for rule in strategy.cascade(field) {
        let Some(raw) = rule.lookup(doc) else {
            continue;
        };

        match coerce(raw) {
            Some(value) => {
                tracing::trace!("{} matched by {:?}", field, rule);
                return Some(value);
            }
            None => tracing::debug!("Discarding unusable {} from {:?}", field, rule),
        }
    }
    None
}

/// Parses a display count such as "1,234 going" or "Attendees (42)"
fn parse_count(raw: &str) -> Option<u32> {
    let digits = COUNT_PATTERN.find(raw)?.as_str().replace(',', "");
    digits.parse().ok()
}

fn non_empty(raw: String) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}
