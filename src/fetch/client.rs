use anyhow::{Context, Result as AnyhowResult};
use async_trait::async_trait;
use log::info;
use std::time::Duration;

/// Per-request timeout applied to every listing and detail fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (compatible; postdoc_crawler/1.0)";

/// Anything that can hand back the markup behind a URL.
///
/// The crawler talks to the network through this trait only, so tests can
/// swap in an in-memory source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the body of the page at `url`, or an error if it could not be retrieved.
    async fn fetch_page(&self, url: &str) -> AnyhowResult<String>;
}

/// `PageSource` backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Builds a client with the given per-request timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpPageSource)` - A ready-to-use page source.
    /// * `Err(anyhow::Error)` - The TLS backend or client could not be initialised.
    pub fn new(timeout: Duration) -> AnyhowResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> AnyhowResult<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context(format!("Failed to get {}", url))?
            .error_for_status()
            .context(format!("Unexpected status for {}", url))?;
        let text = resp.text().await.context("Failed to get response text")?;
        Ok(text)
    }
}

/// Fetches the top-level listing page.
///
/// Unlike detail pages, a failure here is fatal to the run.
///
/// # Arguments
///
/// * `source` - Where to fetch pages from.
/// * `listing_url` - Absolute URL of the listing page.
pub async fn fetch_listing(source: &dyn PageSource, listing_url: &str) -> AnyhowResult<String> {
    let body = source
        .fetch_page(listing_url)
        .await
        .context("Failed to fetch listing page")?;
    info!("Fetched listing page ({} bytes)", body.len());
    Ok(body)
}

/// Builds an absolute URL from a listing href.
///
/// Hrefs that are already absolute are returned unchanged; relative ones are
/// joined to `site_origin` with exactly one slash in between.
///
/// # Examples
///
/// ```rust
/// use postdoc_crawler::fetch::absolute_url;
/// assert_eq!(
///     absolute_url("https://academicjobsonline.org", "/ajo/jobs/123"),
///     "https://academicjobsonline.org/ajo/jobs/123"
/// );
/// ```
pub fn absolute_url(site_origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let origin = site_origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}
