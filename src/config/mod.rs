//! Configuration loading for event imports
//!
//! All settings are optional. The library works with `Config::default()`;
//! the CLI can load overrides from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use event_import::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("event-import.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, ExtractionConfig, FetcherConfig, TimezonePolicy, DEFAULT_ACCEPT,
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT, MAX_DESCRIPTION_CHARS, MAX_TIMEOUT_SECS,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
