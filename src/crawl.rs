use crate::export::{load_snapshot, log_summary, save_postings, with_country};
use crate::fetch::{dispatch_candidates, fetch_listing, PageSource, DEFAULT_CONCURRENCY};
use crate::parse::enumerate_candidates;
use crate::reconcile::{reconcile, ReconcileReport};
use anyhow::Result as AnyhowResult;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Where one crawl reads from and writes to.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub listing_url: String,
    pub site_origin: String,
    /// Snapshot read at the start of the run and replaced at the end.
    pub snapshot_path: PathBuf,
    /// Enriched copy of the snapshot with a country column.
    pub published_path: PathBuf,
    pub concurrency: usize,
}

impl CrawlConfig {
    pub fn new(
        listing_url: impl Into<String>,
        site_origin: impl Into<String>,
        snapshot_path: impl Into<PathBuf>,
        published_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            listing_url: listing_url.into(),
            site_origin: site_origin.into(),
            snapshot_path: snapshot_path.into(),
            published_path: published_path.into(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Runs one crawl: listing, detail pages, reconciliation, snapshot, publish.
///
/// The previous snapshot is loaded and the listing fetched and parsed before
/// anything is written, so a failure in any of those steps leaves both files
/// on disk exactly as they were.
///
/// # Arguments
///
/// * `source` - Where the listing and detail pages are fetched from.
/// * `config` - URLs, file locations and the fetch concurrency.
///
/// # Returns
///
/// * `Ok(ReconcileReport)` - The reconciled postings once both files are written.
/// * `Err(anyhow::Error)` - The snapshot, the listing page or a file write failed.
pub async fn run_crawl(
    source: Arc<dyn PageSource>,
    config: &CrawlConfig,
) -> AnyhowResult<ReconcileReport> {
    info!("Starting crawl of {}", config.listing_url);
    let previous = load_snapshot(&config.snapshot_path)?;

    let listing = fetch_listing(source.as_ref(), &config.listing_url).await?;
    let candidates = enumerate_candidates(&listing, &config.site_origin)?;
    info!("Dispatching {} candidates", candidates.len());

    let fresh = dispatch_candidates(Arc::clone(&source), candidates, config.concurrency).await;
    let report = reconcile(fresh, &previous);

    save_postings(&config.snapshot_path, &report.postings)?;
    log_summary(&report);

    save_postings(&config.published_path, &with_country(&report.postings))?;
    info!("Crawl complete");
    Ok(report)
}
