// src/logging.rs
// =============================================================================
// Diagnostic logging setup.
//
// The crawl loop reports progress and fetch failures through `tracing`
// macros. This file installs the global subscriber that turns those events
// into lines on stderr, so stdout stays free for the crawl report.
//
// Verbosity applies to this crate only. The HTTP stack (reqwest, hyper) is
// chatty at debug level, so it stays at warn unless RUST_LOG says otherwise.
//
// Rust concepts:
// - Option<Layer> is itself a Layer: None simply does nothing, which lets one
//   subscriber stack cover both output formats
// =============================================================================

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

// Filter used when RUST_LOG is not set
fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level))
}

// Installs the global tracing subscriber
//
// json: newline-delimited JSON instead of human-readable lines.
// Only the first call takes effect; later calls are ignored.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let json_layer = json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .ok();
}

// Maps the --verbose flag to a default level
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
