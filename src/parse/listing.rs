use super::fields::{collapsed_text, deadline_marker, extract_title, first_element};
use crate::fetch::{absolute_url, Candidate};
use anyhow::{anyhow, bail, Result as AnyhowResult};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

/// Deadline text used when a listing entry has no deadline marker.
pub const NO_DEADLINE: &str = "No deadline specified";

fn selector(css: &str) -> AnyhowResult<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))
}

/// Relevance predicate for physics-adjacent postings.
///
/// Keeps a posting when its title or department mentions physics, or its
/// title mentions "artificial" or "natural". Matching is a case-insensitive
/// substring test and deliberately broad.
///
/// # Examples
///
/// ```rust
/// use postdoc_crawler::parse::is_relevant;
/// assert!(is_relevant("Postdoctoral Fellow in Physics", "Mathematics"));
/// assert!(!is_relevant("Staff Accountant", "Finance"));
/// ```
pub fn is_relevant(title: &str, department: &str) -> bool {
    let title = title.to_lowercase();
    let department = department.to_lowercase();
    title.contains("physics")
        || department.contains("physics")
        || title.contains("artificial")
        || title.contains("natural")
}

/// Parses the listing page into relevant candidates.
///
/// Each `div.clr` block is one institution: the first link of its `h3` is the
/// institution, the second (if any) the department. Every `li` of the block's
/// `ol.sp5` is one posting. Entries missing their anchor or href are skipped
/// with a warning; irrelevant postings are filtered out here.
///
/// # Arguments
///
/// * `html` - The raw markup of the listing page.
/// * `site_origin` - Origin used to turn relative hrefs into absolute URLs.
///
/// # Returns
///
/// * `Ok(Vec<Candidate>)` - Relevant candidates in listing order.
/// * `Err(anyhow::Error)` - The page contains no institution blocks at all,
///   which means it is not a listing page.
pub fn enumerate_candidates(html: &str, site_origin: &str) -> AnyhowResult<Vec<Candidate>> {
    let document = Html::parse_document(html);
    let block_selector = selector("div.clr")?;
    let heading_selector = selector("h3")?;
    let heading_link_selector = selector("h3 a")?;
    let positions_selector = selector("ol.sp5")?;
    let item_selector = selector("li")?;

    let blocks: Vec<ElementRef> = document.select(&block_selector).collect();
    if blocks.is_empty() {
        bail!("Listing page has no institution blocks");
    }

    let mut candidates = Vec::new();
    let mut seen = 0;
    for block in blocks {
        if block.select(&heading_selector).next().is_none() {
            debug!("Skipping block without heading");
            continue;
        }
        let links: Vec<String> = block.select(&heading_link_selector).map(collapsed_text).collect();
        let Some(institution) = links.first().cloned() else {
            warn!("Skipping institution block without a link");
            continue;
        };
        let department = links.get(1).cloned().unwrap_or_default();

        let Some(positions) = block.select(&positions_selector).next() else {
            debug!("No positions listed for {}", institution);
            continue;
        };

        for position in positions.select(&item_selector) {
            seen += 1;
            let Some(candidate) = parse_position(position, &institution, &department, site_origin)
            else {
                continue;
            };
            if is_relevant(&candidate.title, &candidate.department) {
                candidates.push(candidate);
            }
        }
    }

    info!(
        "Listing has {} postings, {} relevant",
        seen,
        candidates.len()
    );
    Ok(candidates)
}

fn parse_position(
    position: ElementRef<'_>,
    institution: &str,
    department: &str,
    site_origin: &str,
) -> Option<Candidate> {
    let Some(link) = first_element(position, "a") else {
        warn!("Skipping posting without a link at {}", institution);
        return None;
    };
    let Some(href) = link.value().attr("href") else {
        warn!("Skipping posting without an href at {}", institution);
        return None;
    };
    let posting_id = link
        .text()
        .collect::<String>()
        .trim()
        .trim_matches(|c: char| c == '[' || c == ']')
        .trim()
        .to_string();
    if posting_id.is_empty() {
        warn!("Skipping posting without an id at {}", institution);
        return None;
    }

    let deadline_raw = deadline_marker(position)
        .map(|span| span.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| NO_DEADLINE.to_string());

    Some(Candidate {
        institution: institution.to_string(),
        department: department.to_string(),
        title: extract_title(position),
        posting_id,
        deadline_raw,
        detail_url: absolute_url(site_origin, href),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://academicjobsonline.org";

    const LISTING: &str = r#"
<html><body>
<div class="clr">
  <h3><a href="/ajo/inst/1">Institute for Basic Science</a>, <a href="/ajo/dept/1">Center for Theoretical Physics</a></h3>
  <ol class="sp5">
    <li><a href="/ajo/jobs/101">[101]</a> <b>Postdoctoral Research Fellow</b> <span class="purplesml">(deadline 2024/11/01 11:59PM*)</span></li>
    <li><a href="/ajo/jobs/102">[102]</a> Administrative Assistant</li>
  </ol>
</div>
<div class="clr">
  <h3><a href="/ajo/inst/2">State University</a>, <a href="/ajo/dept/2">Mathematics</a></h3>
  <ol class="sp5">
    <li><a href="/ajo/jobs/201">[201]</a> Postdoctoral Fellow in Physics <span class="purplesml">(filled)</span></li>
    <li><a href="/ajo/jobs/202">[202]</a> Artificial Intelligence Postdoc</li>
    <li><a href="/ajo/jobs/203">[203]</a> Staff Accountant</li>
    <li>Broken entry without a link</li>
  </ol>
</div>
<div class="clr">
  <h3><a href="/ajo/inst/3">Lonely College</a></h3>
  <ol class="sp5">
    <li><a href="https://other.site/jobs/301">[301]</a> Natural Philosophy Lecturer</li>
  </ol>
</div>
<div class="clr"><p>Advertisement</p></div>
</body></html>"#;

    /// Tests that relevant postings are enumerated with all their listing fields.
    #[test]
    fn test_enumerate_candidates() {
        let candidates = enumerate_candidates(LISTING, ORIGIN).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.posting_id.as_str()).collect();
        assert_eq!(ids, vec!["101", "102", "201", "202", "301"]);

        let first = &candidates[0];
        assert_eq!(first.institution, "Institute for Basic Science");
        assert_eq!(first.department, "Center for Theoretical Physics");
        assert_eq!(first.title, "Postdoctoral Research Fellow");
        assert_eq!(first.deadline_raw, "(deadline 2024/11/01 11:59PM*)");
        assert_eq!(first.detail_url, "https://academicjobsonline.org/ajo/jobs/101");

        assert_eq!(candidates[3].deadline_raw, NO_DEADLINE);
        assert_eq!(candidates[4].department, "");
        assert_eq!(candidates[4].detail_url, "https://other.site/jobs/301");
    }

    /// Tests that a page without institution blocks is rejected.
    #[test]
    fn test_enumerate_candidates_not_a_listing() {
        assert!(enumerate_candidates("<html><body>Service unavailable</body></html>", ORIGIN).is_err());
    }

    /// Tests the relevance predicate on titles and departments.
    #[test]
    fn test_is_relevant() {
        assert!(is_relevant("Postdoctoral Fellow in Physics", "Mathematics"));
        assert!(is_relevant("Postdoc", "Department of PHYSICS"));
        assert!(is_relevant("Artificial Intelligence Fellow", "Computer Science"));
        assert!(is_relevant("Natural Language Postdoc", "Linguistics"));
        assert!(is_relevant("Astrophysics Postdoc", "Astronomy"));
        assert!(!is_relevant("Staff Accountant", "Finance"));
        assert!(!is_relevant("Postdoc in Chemistry", "Chemistry"));
    }
}
