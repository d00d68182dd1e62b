use url::Url;

/// Returns the lowercase host of a URL with any trailing root dot removed
///
/// `Url` already lowercases registrable domains, but IP hosts and some
/// inputs keep their original form, so the host is normalized here before it
/// is compared against platform patterns.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use event_import::url::normalized_host;
///
/// let url = Url::parse("https://WWW.Meetup.com/foo/events/1/").unwrap();
/// assert_eq!(normalized_host(&url), Some("www.meetup.com".to_string()));
/// ```
pub fn normalized_host(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_end_matches('.').to_lowercase())
        .filter(|h| !h.is_empty())
}

/// Checks if a host matches a platform domain pattern
///
/// Two pattern forms are supported:
/// 1. Exact: "lu.ma" matches only "lu.ma"
/// 2. Wildcard: "*.meetup.com" matches "meetup.com" itself and any
///    subdomain such as "www.meetup.com"
///
/// The host must already be lowercase (see [`normalized_host`]).
///
/// # Examples
///
/// ```
/// use event_import::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.meetup.com", "www.meetup.com"));
/// assert!(matches_wildcard("*.meetup.com", "meetup.com"));
/// assert!(!matches_wildcard("*.meetup.com", "notmeetup.com"));
/// ```
pub fn matches_wildcard(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            host == base
                || host
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1)
        }
        None => host == pattern,
    }
}
