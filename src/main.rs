// src/main.rs
// =============================================================================
// This is the entry point of the crawl-queue CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (diagnostics go to stderr)
// 3. Merge the --config file with the command-line flags
// 4. Run the subcommand and print its result to stdout
// 5. Exit with proper code (0 = clean crawl, 1 = some fetches failed,
//    2 = error)
// =============================================================================

mod cli;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands, RuleArgs};
use crawl_queue::crawl::{CrawlContext, CrawlQueue};
use crawl_queue::logging;
use crawl_queue::{CrawlEngine, CrawlReport, HttpFetcher, Settings};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json, logging::level_for(cli.verbose));

    match cli.command {
        Commands::Crawl {
            seeds,
            rules,
            referrer,
            proxy,
            proxy_login,
            proxy_password,
            timeout,
            max_pages,
            json,
        } => {
            let overrides = Settings {
                referrer,
                proxy,
                proxy_login,
                proxy_password,
                timeout_secs: timeout,
                max_pages,
                ..rules.to_settings()
            };
            let settings = load_settings(&rules)?.merge(overrides);
            handle_crawl(seeds, &settings, json).await
        }
        Commands::Extract { file, base, rules } => {
            let settings = load_settings(&rules)?.merge(rules.to_settings());
            handle_extract(&file, &base, &settings)
        }
    }
}

// Reads the --config file, or starts from empty settings
fn load_settings(rules: &RuleArgs) -> Result<Settings> {
    match &rules.config {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(seeds: Vec<String>, settings: &Settings, json: bool) -> Result<i32> {
    let config = settings
        .crawl_config()
        .context("invalid crawl rules")?;
    let fetcher = HttpFetcher::new(&settings.fetch_settings())
        .context("could not set up the HTTP client")?;

    // With --json, stdout must hold nothing but the report
    if !json {
        println!("🔍 Crawling from {} seed(s)", seeds.len());
    }

    let mut engine = CrawlEngine::new(config, fetcher);
    let report = engine.crawl(seeds).await;

    print!("{}", render_report(&report, json)?);

    Ok(if report.is_clean() { 0 } else { 1 })
}

// Renders the report as pretty JSON or as the human-readable table
fn render_report(report: &CrawlReport, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(format_table(report))
    }
}

// Handles the 'extract' subcommand
fn handle_extract(file: &Path, base: &str, settings: &Settings) -> Result<i32> {
    let content = read_input(file)?;
    let config = settings
        .crawl_config()
        .context("invalid crawl rules")?;

    let mut queue = CrawlQueue::new();
    queue.enqueue_all([base]);
    let ctx = CrawlContext::new(&queue);

    let addresses = config
        .extractor
        .extract(&content, &config.rules, &config.hooks, &ctx);

    for address in &addresses {
        println!("{}", address);
    }

    Ok(0)
}

// Reads a file, or stdin when the path is "-"
fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))
    }
}

// Formats the crawl report as a human-readable table
fn format_table(report: &CrawlReport) -> String {
    use std::fmt::Write;

    // Writing into a String never fails, so the fmt::Results are ignored
    let mut out = String::new();
    let _ = writeln!(out, "{:<70} {:<10}", "ADDRESS", "STATUS");
    let _ = writeln!(out, "{}", "=".repeat(81));

    for address in &report.fetched {
        let _ = writeln!(out, "{:<70} {:<10}", truncate(address), "✅ OK");
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "{:<70} {:<10} {}",
            truncate(&failure.address),
            "❌ FAILED",
            failure.message
        );
    }
    for address in &report.skipped {
        let _ = writeln!(out, "{:<70} {:<10}", truncate(address), "⏭️  SKIPPED");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Summary:");
    let _ = writeln!(out, "   📋 Queued: {}", report.queued.len());
    let _ = writeln!(out, "   ✅ Fetched: {}", report.fetched.len());
    let _ = writeln!(out, "   ❌ Failed: {}", report.failures.len());
    let _ = writeln!(out, "   ⏭️  Skipped: {}", report.skipped.len());
    out
}

// Shortens long addresses so the table stays aligned
fn truncate(address: &str) -> String {
    if address.chars().count() > 67 {
        let head: String = address.chars().take(67).collect();
        format!("{}...", head)
    } else {
        address.to_string()
    }
}
