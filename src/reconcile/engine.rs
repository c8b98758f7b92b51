use super::normalize::normalize_posting;
use super::types::{Classification, ReconcileReport, Snapshot};
use crate::parse::{deadline_sort_key, Posting};
use crate::utils::posting_digest;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Merges freshly crawled postings into the previous snapshot.
///
/// Each fresh posting is normalized and classified:
/// - id not in the snapshot: **new**, the fresh posting is kept;
/// - id present with different content: **updated**, the fresh posting is kept;
/// - id present with equal content: **unchanged**, the snapshot's posting is
///   kept verbatim so downstream enrichment survives.
///
/// Snapshot postings missing from the crawl are dropped and listed in
/// `removed`. If the crawl repeats an id, the first occurrence wins. The
/// resulting postings are ordered by deadline, unknown deadlines last.
///
/// # Arguments
///
/// * `fresh` - Postings produced by the dispatcher, in any order.
/// * `previous` - The snapshot loaded at the start of the run.
pub fn reconcile(fresh: Vec<Posting>, previous: &Snapshot) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(fresh.len());

    for posting in fresh.into_iter().map(normalize_posting) {
        if !seen.insert(posting.posting_id.clone()) {
            warn!("Duplicate job {} in crawl, keeping the first copy", posting.posting_id);
            continue;
        }
        let id = posting.posting_id.clone();

        match previous.get(&id) {
            None => {
                report.record(id, Classification::New);
                report.postings.push(posting);
            }
            Some(prior) if prior.same_content(&posting) => {
                report.record(id, Classification::Unchanged);
                report.postings.push(prior.clone());
            }
            Some(prior) => {
                debug!(
                    "Job {} changed: {} -> {}",
                    id,
                    posting_digest(prior),
                    posting_digest(&posting)
                );
                report.record(id, Classification::Updated);
                report.postings.push(posting);
            }
        }
    }

    report.removed = previous
        .ids()
        .filter(|id| !seen.contains(*id))
        .map(str::to_string)
        .collect();
    report.removed.sort();

    sort_by_deadline(&mut report.postings);
    info!(
        "Reconciled {} postings: {} new, {} updated, {} unchanged, {} removed",
        report.postings.len(),
        report.new.len(),
        report.updated.len(),
        report.unchanged.len(),
        report.removed.len()
    );
    report
}

/// Orders postings by ascending deadline, unknown deadlines last, ties by id.
pub fn sort_by_deadline(postings: &mut [Posting]) {
    postings.sort_by_cached_key(|p| (deadline_sort_key(&p.deadline_raw), p.posting_id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: &str, deadline: &str) -> Posting {
        Posting {
            institution: "Institute".to_string(),
            department: "Physics".to_string(),
            posting_id: id.to_string(),
            title: format!("Postdoc {}", id),
            deadline_raw: deadline.to_string(),
            detail_url: format!("https://academicjobsonline.org/ajo/jobs/{}", id),
            application_materials: vec!["CV".to_string(), "Cover letter".to_string()],
            position_location: "Seoul, Korea".to_string(),
            subject_area: "Physics".to_string(),
            country: None,
        }
    }

    /// Tests the new/updated/unchanged classification and which copy is kept.
    #[test]
    fn test_reconcile_classifies_each_posting() {
        let mut enriched = posting("2", "(filled)");
        enriched.country = Some("Korea".to_string());
        let previous = Snapshot::from_postings(vec![
            enriched,
            posting("3", "(deadline 2024/12/01 11:59PM*)"),
        ]);

        let mut changed = posting("3", "(deadline 2024/12/01 11:59PM*)");
        changed.subject_area = "Astrophysics".to_string();
        let mut reformatted = posting("2", " (filled) ");
        reformatted.application_materials.reverse();

        let report = reconcile(
            vec![posting("1", "(deadline 2024/11/01 11:59PM*)"), reformatted, changed],
            &previous,
        );

        assert_eq!(report.new, vec!["1"]);
        assert_eq!(report.updated, vec!["3"]);
        assert_eq!(report.unchanged, vec!["2"]);
        assert_eq!(report.classification("2"), Some(Classification::Unchanged));
        assert_eq!(report.classification("9"), None);

        let kept = report.postings.iter().find(|p| p.posting_id == "2").unwrap();
        assert_eq!(kept.country.as_deref(), Some("Korea"));
        let updated = report.postings.iter().find(|p| p.posting_id == "3").unwrap();
        assert_eq!(updated.subject_area, "Astrophysics");
    }

    /// Tests that every fresh posting lands in exactly one class.
    #[test]
    fn test_reconcile_partitions_fresh_postings() {
        let previous = Snapshot::from_postings((0..6).map(|i| posting(&i.to_string(), "")));
        let mut fresh: Vec<Posting> = (3..10).map(|i| posting(&i.to_string(), "")).collect();
        fresh[0].title = "Changed".to_string();

        let report = reconcile(fresh, &previous);

        let mut all: Vec<String> = report
            .new
            .iter()
            .chain(&report.updated)
            .chain(&report.unchanged)
            .cloned()
            .collect();
        all.sort();
        let mut expected: Vec<String> = (3..10).map(|i| i.to_string()).collect();
        expected.sort();
        assert_eq!(all, expected);
        assert_eq!(report.updated, vec!["3"]);
        assert_eq!(report.postings.len(), 7);
    }

    /// Tests that postings missing from the crawl are pruned and reported.
    #[test]
    fn test_reconcile_prunes_vanished_postings() {
        let previous = Snapshot::from_postings(vec![posting("1", ""), posting("2", "")]);

        let report = reconcile(vec![posting("2", "")], &previous);

        assert_eq!(report.removed, vec!["1"]);
        let next = Snapshot::from_postings(report.postings.clone());
        assert!(!next.contains("1"));
        assert!(next.contains("2"));
        assert_eq!(next.len(), 1);
    }

    /// Tests that repeated ids within one crawl keep only the first copy.
    #[test]
    fn test_reconcile_drops_duplicate_ids() {
        let mut second = posting("1", "");
        second.title = "Second copy".to_string();

        let report = reconcile(vec![posting("1", ""), second], &Snapshot::default());

        assert_eq!(report.postings.len(), 1);
        assert_eq!(report.postings[0].title, "Postdoc 1");
        assert_eq!(report.new, vec!["1"]);
    }

    /// Tests deadline ordering with unknown deadlines last.
    #[test]
    fn test_reconcile_orders_by_deadline() {
        let fresh = vec![
            posting("a", "(filled)"),
            posting("b", "(deadline 2025/01/15 9:00AM*)"),
            posting("c", "(deadline 2024/11/01 11:59PM*)"),
            posting("d", "No deadline specified"),
        ];

        let report = reconcile(fresh, &Snapshot::default());

        let order: Vec<&str> = report.postings.iter().map(|p| p.posting_id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a", "d"]);
    }
}
