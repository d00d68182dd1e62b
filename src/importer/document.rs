//! Queryable HTML document for event pages
//!
//! Wraps a `scraper` tree with the handful of lookups the extractors need.
//! Parsing is best-effort like a browser: malformed markup still yields a
//! document, possibly with fewer matches.

use scraper::{ElementRef, Html, Selector};

/// Parsed event page
pub struct EventDocument {
    html: Html,
}

impl EventDocument {
    /// Parses raw HTML; never fails
    ///
    /// # Example
    ///
    /// ```
    /// use event_import::importer::EventDocument;
    ///
    /// let doc = EventDocument::parse("<html><head><title> Foo | Meetup </title></head></html>");
    /// assert_eq!(doc.title(), Some("Foo | Meetup".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// Text of the first element matching `css` whose text is not blank
    pub fn select_text(&self, css: &str) -> Option<String> {
        let selector = parse_selector(css)?;
        self.html
            .select(&selector)
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    /// Attribute value of the first element matching `css` that carries a
    /// non-blank `attr`
    pub fn select_attr(&self, css: &str, attr: &str) -> Option<String> {
        let selector = parse_selector(css)?;
        self.html
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(collapse_whitespace)
            .find(|value| !value.is_empty())
    }

    /// Machine-readable time of the first element matching `css`
    ///
    /// Prefers the `datetime` attribute and falls back to the element text.
    pub fn time_value(&self, css: &str) -> Option<String> {
        let selector = parse_selector(css)?;
        self.html.select(&selector).find_map(|el| {
            el.value()
                .attr("datetime")
                .map(collapse_whitespace)
                .filter(|v| !v.is_empty())
                .or_else(|| Some(element_text(el)).filter(|t| !t.is_empty()))
        })
    }

    /// Content of a `<meta>` tag keyed by `property` (Open Graph) or `name`
    /// (Twitter cards, description)
    pub fn meta_content(&self, key: &str) -> Option<String> {
        ["property", "name"].iter().find_map(|attr| {
            self.select_attr(&format!(r#"meta[{}="{}"]"#, attr, key), "content")
        })
    }

    /// Text of the `<title>` element
    pub fn title(&self) -> Option<String> {
        self.select_text("title")
    }

    /// Raw contents of every JSON-LD script, in document order
    pub fn json_ld_blocks(&self) -> Vec<String> {
        let Some(selector) = parse_selector(r#"script[type="application/ld+json"]"#) else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .map(|raw| {
                raw.trim()
                    .trim_start_matches("<![CDATA[")
                    .trim_end_matches("]]>")
                    .trim()
                    .to_string()
            })
            .filter(|raw| !raw.is_empty())
            .collect()
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Skipping invalid selector '{}': {:?}", css, e);
            None
        }
    }
}
