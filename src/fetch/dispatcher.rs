use super::client::PageSource;
use super::types::Candidate;
use crate::parse::{extract_detail_fields, Posting};
use anyhow::{Context, Result as AnyhowResult};
use futures::future::join_all;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Number of detail pages fetched at the same time unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Fetches every candidate's detail page concurrently and extracts its fields.
///
/// Each candidate runs in its own task; a semaphore keeps at most
/// `concurrency` fetches in flight. A candidate whose fetch or extraction
/// fails is logged and dropped, the others are unaffected. All tasks are
/// drained before this function returns, so every failure has been observed
/// by the time reconciliation starts.
///
/// # Arguments
///
/// * `source` - Where detail pages are fetched from.
/// * `candidates` - Relevant postings taken from the listing page.
/// * `concurrency` - Maximum number of in-flight fetches (values below 1 are treated as 1).
///
/// # Returns
///
/// The postings that were fetched successfully, in completion-independent order.
pub async fn dispatch_candidates(
    source: Arc<dyn PageSource>,
    candidates: Vec<Candidate>,
    concurrency: usize,
) -> Vec<Posting> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let total = candidates.len();

    let ids: Vec<String> = candidates.iter().map(|c| c.posting_id.clone()).collect();
    let fetch_tasks: Vec<JoinHandle<AnyhowResult<Posting>>> = candidates
        .into_iter()
        .map(|candidate| {
            let source = Arc::clone(&source);
            let semaphore = Arc::clone(&semaphore);

            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("Failed to acquire semaphore")?;
                fetch_posting(source.as_ref(), candidate).await
            })
        })
        .collect();

    let results = join_all(fetch_tasks).await;
    let mut postings = Vec::with_capacity(total);
    let mut errors = 0;

    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(Ok(posting)) => postings.push(posting),
            Ok(Err(e)) => {
                warn!("Error processing job {}: {:#}", id, e);
                errors += 1;
            }
            Err(e) => {
                warn!("Task for job {} panicked: {:?}", id, e);
                errors += 1;
            }
        }
    }

    info!(
        "Fetched {} of {} detail pages, {} dropped",
        postings.len(),
        total,
        errors
    );
    postings
}

/// Fetches one detail page and builds the posting from it.
async fn fetch_posting(source: &dyn PageSource, candidate: Candidate) -> AnyhowResult<Posting> {
    let html = source
        .fetch_page(&candidate.detail_url)
        .await
        .context(format!("Failed to fetch {}", candidate.detail_url))?;
    let fields = extract_detail_fields(&html).context("Failed to extract detail fields")?;
    Ok(candidate.into_posting(fields))
}
