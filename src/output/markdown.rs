//! Markdown review sheet
//!
//! Renders an import result for a human to check before the event is
//! published. Fields extraction could not fill are flagged explicitly.

use crate::output::ImportOutcome;

const NOT_FOUND: &str = "_not found_";

/// Formats an import outcome as markdown
pub fn format_markdown_review(outcome: &ImportOutcome) -> String {
    let mut md = String::new();

    match outcome {
        ImportOutcome::Success { data } => {
            md.push_str(&format!("# {}\n\n", data.title));

            md.push_str("## Event Details\n\n");
            md.push_str("| Field | Value |\n");
            md.push_str("|-------|-------|\n");
            md.push_str(&format!("| Source | {} |\n", data.source.display_name()));
            md.push_str(&format!("| URL | {} |\n", data.url));
            md.push_str(&format!("| Date | {} |\n", or_missing(&data.date)));
            md.push_str(&format!("| Time | {} |\n", or_missing(&data.time)));
            md.push_str(&format!("| Location | {} |\n", or_missing(&data.location)));
            md.push_str(&format!("| Organizer | {} |\n", or_missing(&data.organizer)));
            match data.attendees {
                Some(count) => md.push_str(&format!("| Attendees | {} |\n", count)),
                None => md.push_str(&format!("| Attendees | {} |\n", NOT_FOUND)),
            }
            md.push_str(&format!("| Image | {} |\n\n", or_missing(&data.image)));

            md.push_str("## Description\n\n");
            if data.description.is_empty() {
                md.push_str(NOT_FOUND);
                md.push_str("\n\n");
            } else {
                for line in data.description.lines() {
                    md.push_str(&format!("> {}\n", line));
                }
                md.push('\n');
            }

            if data.is_bare() {
                md.push_str("**Nothing could be extracted from this page; enter the details manually.**\n");
            } else {
                md.push_str("_Review every field before publishing._\n");
            }
        }
        ImportOutcome::Failure {
            kind,
            http_status,
            message,
        } => {
            md.push_str("# Import Failed\n\n");
            md.push_str(&format!("- **Kind**: {}\n", kind));
            if let Some(status) = http_status {
                md.push_str(&format!("- **HTTP Status**: {}\n", status));
            }
            md.push_str(&format!("- **Message**: {}\n", message));
        }
    }

    md
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        NOT_FOUND
    } else {
        value
    }
}
