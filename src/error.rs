// src/error.rs
// =============================================================================
// Configuration errors.
//
// Everything that can go wrong while *building* a crawl is reported here,
// before the first request is sent. Once a crawl is running nothing is fatal:
// fetch failures are absorbed by the engine (see crawl/engine.rs).
//
// Rust concepts:
// - thiserror: derive Display/Error for an enum of error cases
// - #[source]: keeps the underlying error available for `anyhow` chains
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An allow or deny rule is not a valid regular expression
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidRulePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The address extraction pattern is not a valid regular expression
    #[error("invalid extraction pattern '{pattern}': {source}")]
    InvalidExtractionPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid proxy address '{proxy}': {reason}")]
    InvalidProxy { proxy: String, reason: String },

    #[error("a proxy login was given but no proxy address is set")]
    ProxyLoginWithoutProxy,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to read settings file {path}: {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_pattern_error_names_the_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidRulePattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid rule pattern '('"));
    }
}
