//! Physics Postdoc Crawler: Fetch, Reconcile, and Publish Job Postings
//!
//! This application crawls the academic job listings site for physics-adjacent
//! postdoctoral positions, fetches every relevant detail page concurrently,
//! and merges the result with the snapshot saved by the previous run.
//!
//! ## Design Overview
//! - **Listing**: The listing page is fetched and parsed into candidates; only
//!   relevant postings are kept (`parse` module).
//! - **Fetching**: Detail pages are fetched by a bounded pool of tasks; one
//!   failing candidate is logged and dropped (`fetch` module).
//! - **Reconciling**: Fresh postings are classified as new, updated or
//!   unchanged against the previous snapshot (`reconcile` module).
//! - **Exporting**: The next snapshot replaces the old one, and an enriched
//!   copy with a country column is published (`export` module).
//!
//! ## Dependencies
//! - **`reqwest`** and **`tokio`**: HTTP requests on an async runtime.
//! - **`scraper`** and **`regex`**: HTML parsing and deadline patterns.
//! - **`serde_json`**: The snapshot file format.
//! - **`log` and `env_logger`**: Logging instead of `println!`.
//! - **`clap`**: Command-line and environment configuration.
//!
//! ## Usage
//! With no arguments the crawler uses the compiled-in listing URL and writes
//! `data/physics_postdocs.json` and `data/physics_postdocs_updated.json`:
//! ```sh
//! cargo run
//! ```
//! Logging defaults to `info` and can be changed with `RUST_LOG`:
//! ```sh
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## Notes
//! - Only a failure to fetch or parse the listing page (or to read an existing
//!   snapshot) aborts the run; the previous snapshot is then left untouched.

use anyhow::Result as AnyhowResult;
use clap::Parser;
use env_logger::Env;
use postdoc_crawler::crawl::{run_crawl, CrawlConfig};
use postdoc_crawler::fetch::{HttpPageSource, PageSource, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments for the crawler. Every option has a working default.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Listing page to crawl.
    #[clap(
        long,
        env = "LISTING_URL",
        default_value = "https://academicjobsonline.org/ajo?joblist-0-0-0-3---0-dt--"
    )]
    listing_url: String,

    /// Origin prefixed to relative detail-page links.
    #[clap(long, env = "SITE_ORIGIN", default_value = "https://academicjobsonline.org")]
    site_origin: String,

    /// Snapshot file read at start and replaced at the end of the run.
    #[clap(long, env = "SNAPSHOT_PATH", default_value = "data/physics_postdocs.json")]
    snapshot: PathBuf,

    /// Enriched copy of the snapshot with a country column.
    #[clap(long, env = "PUBLISHED_PATH", default_value = "data/physics_postdocs_updated.json")]
    published: PathBuf,

    /// Maximum number of detail pages fetched at once.
    #[clap(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

/// Parses the arguments, sets up logging and runs one crawl.
///
/// # Returns
/// - `Ok(())` once the new snapshot and published file are written.
/// - `Err(anyhow::Error)` if the listing page or the existing snapshot cannot be
///   used; nothing is written in that case.
#[tokio::main]
async fn main() -> AnyhowResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = CrawlConfig::new(args.listing_url, args.site_origin, args.snapshot, args.published);
    config.concurrency = args.concurrency;

    let source: Arc<dyn PageSource> =
        Arc::new(HttpPageSource::new(Duration::from_secs(args.timeout_secs))?);
    run_crawl(source, &config).await?;

    Ok(())
}
