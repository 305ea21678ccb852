// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl from one or more seed addresses
// - extract: run only the address extractor over a local file, handy for
//   trying out allow/deny rules without touching the network
//
// Flags shared by both live in RuleArgs and are flattened into each
// subcommand. Whatever the user passes is turned into a `Settings` value and
// merged on top of the --config file (see src/settings.rs).
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crawl_queue::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "crawl-queue",
    version,
    about = "A breadth-first web crawler with allow/deny rules",
    long_about = "crawl-queue fetches pages breadth-first from one or more seed addresses, \
                  extracts quoted addresses from each page and keeps going until no new \
                  allowed address is left."
)]
pub struct Cli {
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log every fetch (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl starting from one or more seed addresses
    ///
    /// Example: crawl-queue crawl https://example.com --allow '^https://example\.com/'
    Crawl {
        /// Seed addresses; the first one sets the scheme and host for
        /// relative links
        #[arg(required = true)]
        seeds: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Referer header sent with every request ("" to send none)
        #[arg(long)]
        referrer: Option<String>,

        /// HTTP proxy, e.g. tcp://1.2.3.4:5555 or http://proxy:3128
        #[arg(long)]
        proxy: Option<String>,

        /// Proxy user name; the proxy itself may come from --config
        #[arg(long)]
        proxy_login: Option<String>,

        #[arg(long)]
        proxy_password: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Stop fetching after this many pages (remaining addresses are skipped)
        #[arg(long)]
        max_pages: Option<usize>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the addresses the crawler would follow from a local file
    ///
    /// Example: crawl-queue extract page.html --base https://example.com/
    Extract {
        /// File to scan, or "-" for stdin
        file: PathBuf,

        /// Address used to resolve "/path" and "//host/path" links
        #[arg(long)]
        base: String,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct RuleArgs {
    /// Only follow addresses matching this regex (repeatable)
    #[arg(long = "allow", value_name = "REGEX")]
    pub allow: Vec<String>,

    /// Never follow addresses matching this regex (repeatable)
    #[arg(long = "deny", value_name = "REGEX")]
    pub deny: Vec<String>,

    /// Custom address extraction regex
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// JSON settings file; command-line flags are applied on top
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RuleArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            allow: self.allow.clone(),
            deny: self.deny.clone(),
            extraction_pattern: self.pattern.clone(),
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crawl_command() {
        let cli = Cli::try_parse_from([
            "crawl-queue",
            "crawl",
            "https://example.com/",
            "https://example.com/docs",
            "--allow",
            "^https://example",
            "--deny",
            "/admin",
            "--deny",
            "\\.png$",
            "--max-pages",
            "10",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Crawl {
                seeds,
                rules,
                max_pages,
                json,
                ..
            } => {
                assert_eq!(seeds.len(), 2);
                assert_eq!(rules.allow, vec!["^https://example"]);
                assert_eq!(rules.deny, vec!["/admin", "\\.png$"]);
                assert_eq!(max_pages, Some(10));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_crawl_requires_a_seed() {
        assert!(Cli::try_parse_from(["crawl-queue", "crawl"]).is_err());
    }

    #[test]
    fn test_proxy_login_can_pair_with_proxy_from_config_file() {
        // The proxy address lives in the settings file, so clap must not
        // insist on --proxy here; the check happens after merging
        let cli = Cli::try_parse_from([
            "crawl-queue",
            "crawl",
            "https://example.com/",
            "--config",
            "settings.json",
            "--proxy-login",
            "user",
            "--proxy-password",
            "secret",
        ])
        .unwrap();

        match cli.command {
            Commands::Crawl {
                rules,
                proxy,
                proxy_login,
                proxy_password,
                ..
            } => {
                assert_eq!(rules.config, Some(PathBuf::from("settings.json")));
                assert_eq!(proxy, None);
                assert_eq!(proxy_login.as_deref(), Some("user"));
                assert_eq!(proxy_password.as_deref(), Some("secret"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_extract_command() {
        let cli = Cli::try_parse_from([
            "crawl-queue",
            "extract",
            "-",
            "--base",
            "https://example.com/",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract { file, base, .. } => {
                assert_eq!(file, PathBuf::from("-"));
                assert_eq!(base, "https://example.com/");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
