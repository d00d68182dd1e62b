//! JSON-LD structured data extraction
//!
//! Every `application/ld+json` block is parsed independently; a malformed
//! block is logged and skipped. Event nodes are collected from top-level
//! objects, top-level arrays, `@graph` containers and nested `event`
//! properties, in document order. Each field takes the first non-empty value
//! across all Event nodes.

use crate::config::TimezonePolicy;
use crate::extract::datetime::parse_start_date;
use crate::extract::ExtractedFields;
use crate::importer::EventDocument;
use serde::Deserialize;
use serde_json::Value;

/// Nesting limit when walking `@graph` / `event` containers
const MAX_NODE_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    fn is_event(&self) -> bool {
        match self {
            Self::Single(t) => is_event_type(t),
            Self::Multiple(types) => types.iter().any(|t| is_event_type(t)),
        }
    }

    fn is_virtual_location(&self) -> bool {
        match self {
            Self::Single(t) => t.ends_with("VirtualLocation"),
            Self::Multiple(types) => types.iter().any(|t| t.ends_with("VirtualLocation")),
        }
    }
}

/// `Event` and its schema.org subtypes (`SocialEvent`, `MusicEvent`, ...),
/// with or without a vocabulary prefix
fn is_event_type(raw: &str) -> bool {
    let name = raw.rsplit(['/', ':']).next().unwrap_or(raw);
    name == "Event"
        || (name.ends_with("Event") && name.starts_with(|c: char| c.is_ascii_uppercase()))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationValue {
    Text(String),
    Many(Vec<LocationValue>),
    Place(Place),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Place {
    #[serde(rename = "@type")]
    kind: Option<SchemaType>,
    name: Option<String>,
    address: Option<AddressValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddressValue {
    Text(String),
    Postal(PostalAddress),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostalAddress {
    #[serde(rename = "streetAddress")]
    street_address: Option<String>,
    #[serde(rename = "addressLocality")]
    address_locality: Option<String>,
}

impl LocationValue {
    fn resolve(&self) -> Option<String> {
        match self {
            Self::Text(text) => non_empty(text),
            Self::Place(place) => place
                .name
                .as_deref()
                .and_then(non_empty)
                .or_else(|| place.address.as_ref().and_then(AddressValue::resolve))
                .or_else(|| {
                    place
                        .kind
                        .as_ref()
                        .filter(|k| k.is_virtual_location())
                        .map(|_| "Online".to_string())
                }),
            Self::Many(items) => items.iter().find_map(Self::resolve),
        }
    }
}

impl AddressValue {
    fn resolve(&self) -> Option<String> {
        match self {
            Self::Text(text) => non_empty(text),
            Self::Postal(postal) => {
                let parts: Vec<String> = [&postal.street_address, &postal.address_locality]
                    .into_iter()
                    .filter_map(|part| part.as_deref().and_then(non_empty))
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrganizerValue {
    Name(String),
    Many(Vec<OrganizerValue>),
    Entity { name: Option<String> },
}

impl OrganizerValue {
    fn resolve(&self) -> Option<String> {
        match self {
            Self::Name(name) => non_empty(name),
            Self::Entity { name } => name.as_deref().and_then(non_empty),
            Self::Many(items) => items.iter().find_map(Self::resolve),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageValue {
    Url(String),
    Many(Vec<ImageValue>),
    Object { url: Option<String> },
}

impl ImageValue {
    fn resolve(&self) -> Option<String> {
        match self {
            Self::Url(url) => non_empty(url),
            Self::Object { url } => url.as_deref().and_then(non_empty),
            Self::Many(items) => items.iter().find_map(Self::resolve),
        }
    }
}

/// Extracts event fields from every JSON-LD block in the document
///
/// Never fails: unparseable blocks and unrecognized shapes simply contribute
/// nothing.
pub fn extract_structured(doc: &EventDocument, policy: TimezonePolicy) -> ExtractedFields {
    let mut nodes = Vec::new();
    for (index, block) in doc.json_ld_blocks().iter().enumerate() {
        match serde_json::from_str::<Value>(block) {
            Ok(value) => collect_event_nodes(value, 0, &mut nodes),
            Err(e) => tracing::debug!("Skipping malformed JSON-LD block #{}: {}", index, e),
        }
    }

    tracing::debug!("Found {} JSON-LD event node(s)", nodes.len());

    let mut fields = ExtractedFields::default();
    for node in &nodes {
        fill_from_node(&mut fields, node, policy);
    }
    fields
}

fn collect_event_nodes(value: Value, depth: usize, out: &mut Vec<Value>) {
    if depth > MAX_NODE_DEPTH {
        return;
    }

    match value {
        Value::Array(items) => {
            for item in items {
                collect_event_nodes(item, depth + 1, out);
            }
        }
        Value::Object(mut map) => {
            let graph = map.remove("@graph");
            let nested = map.remove("event");

            let is_event = map
                .get("@type")
                .and_then(|t| SchemaType::deserialize(t).ok())
                .is_some_and(|t| t.is_event());
            if is_event {
                out.push(Value::Object(map));
            }

            if let Some(graph) = graph {
                collect_event_nodes(graph, depth + 1, out);
            }
            if let Some(nested) = nested {
                collect_event_nodes(nested, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// Fills every still-empty field from one Event node
fn fill_from_node(fields: &mut ExtractedFields, node: &Value, policy: TimezonePolicy) {
    if fields.title.is_none() {
        fields.title = string_field(node, "name");
    }
    if fields.description.is_none() {
        fields.description = string_field(node, "description");
    }
    if fields.start.is_none() {
        fields.start = string_field(node, "startDate")
            .and_then(|raw| parse_start_date(&raw, policy));
    }
    if fields.location.is_none() {
        fields.location = node
            .get("location")
            .and_then(|v| LocationValue::deserialize(v).ok())
            .and_then(|l| l.resolve());
    }
    if fields.organizer.is_none() {
        fields.organizer = node
            .get("organizer")
            .and_then(|v| OrganizerValue::deserialize(v).ok())
            .and_then(|o| o.resolve());
    }
    if fields.attendees.is_none() {
        fields.attendees = node.get("attendee").and_then(attendee_count);
    }
    if fields.image.is_none() {
        fields.image = node
            .get("image")
            .and_then(|v| ImageValue::deserialize(v).ok())
            .and_then(|i| i.resolve());
    }
}

fn string_field(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).and_then(non_empty)
}

fn attendee_count(value: &Value) -> Option<u32> {
    match value {
        Value::Array(items) => u32::try_from(items.len()).ok(),
        Value::Object(_) => Some(1),
        _ => None,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
