// src/settings.rs
// =============================================================================
// Crawl settings from a JSON file and the command line.
//
// A settings file looks like:
//
//   {
//     "allow": ["^https://example\\.com/"],
//     "deny": ["/admin", "\\.(png|jpg|css|js)$"],
//     "referrer": "https://www.google.ru/",
//     "proxy": "tcp://1.2.3.4:5555",
//     "proxy_login": "user",
//     "proxy_password": "secret",
//     "timeout_secs": 10,
//     "max_pages": 500
//   }
//
// Every field is optional. Command-line flags are merged on top: rule lists
// are appended, single values replace what the file said.
//
// Rust concepts:
// - serde: #[derive(Deserialize)] reads the JSON straight into the struct
// - #[serde(default)]: missing fields fall back to Default::default()
// =============================================================================

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crawl::{CrawlConfig, FetchDecision, FetchSettings, LifecycleHooks};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub extraction_pattern: Option<String>,
    pub referrer: Option<String>,
    pub proxy: Option<String>,
    pub proxy_login: Option<String>,
    pub proxy_password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_pages: Option<usize>,
}

impl Settings {
    // Reads a settings file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::ParseSettings {
            path: path.to_path_buf(),
            source,
        })
    }

    // Layers `overrides` on top of self
    pub fn merge(mut self, overrides: Settings) -> Self {
        self.allow.extend(overrides.allow);
        self.deny.extend(overrides.deny);
        self.extraction_pattern = overrides.extraction_pattern.or(self.extraction_pattern);
        self.referrer = overrides.referrer.or(self.referrer);
        self.proxy = overrides.proxy.or(self.proxy);
        self.proxy_login = overrides.proxy_login.or(self.proxy_login);
        self.proxy_password = overrides.proxy_password.or(self.proxy_password);
        self.timeout_secs = overrides.timeout_secs.or(self.timeout_secs);
        self.max_pages = overrides.max_pages.or(self.max_pages);
        self
    }

    // Hooks implied by the settings
    //
    // max_pages is a before-fetch veto: once that many fetches have been
    // attempted, every remaining address is skipped.
    pub fn hooks(&self) -> LifecycleHooks {
        match self.max_pages {
            Some(max_pages) => {
                let attempted = AtomicUsize::new(0);
                LifecycleHooks::new().before_fetch(move |address, _| {
                    if attempted.fetch_add(1, Ordering::Relaxed) < max_pages {
                        FetchDecision::Proceed
                    } else {
                        tracing::debug!(%address, max_pages, "page limit reached");
                        FetchDecision::Skip
                    }
                })
            }
            None => LifecycleHooks::new(),
        }
    }

    pub fn crawl_config(&self) -> Result<CrawlConfig, ConfigError> {
        let mut builder = CrawlConfig::builder()
            .allow_patterns(self.allow.iter().cloned())
            .deny_patterns(self.deny.iter().cloned())
            .hooks(self.hooks());

        if let Some(pattern) = &self.extraction_pattern {
            builder = builder.extraction_pattern(pattern.clone());
        }

        builder.build()
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let defaults = FetchSettings::default();

        FetchSettings {
            referrer: self.referrer.clone().unwrap_or(defaults.referrer),
            proxy: self.proxy.clone(),
            proxy_login: self.proxy_login.clone(),
            proxy_password: self.proxy_password.clone(),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
