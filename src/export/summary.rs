use crate::parse::parse_deadline;
use crate::reconcile::{Classification, ReconcileReport};
use log::info;

/// Formats one line per new or updated posting, in snapshot order.
///
/// Each line shows the class, id, institution, title and the posting's
/// canonical deadline.
pub fn change_lines(report: &ReconcileReport) -> Vec<String> {
    report
        .postings
        .iter()
        .filter_map(|posting| {
            let label = match report.classification(&posting.posting_id)? {
                Classification::New => "new",
                Classification::Updated => "updated",
                Classification::Unchanged => return None,
            };
            Some(format!(
                "{} [{}] {} - {} (deadline: {})",
                label,
                posting.posting_id,
                posting.institution,
                posting.title,
                parse_deadline(&posting.deadline_raw)
            ))
        })
        .collect()
}

/// Logs the run's totals followed by the per-posting change lines.
pub fn log_summary(report: &ReconcileReport) {
    info!("Found {} physics-related postdoc postings", report.postings.len());
    info!("New postings: {}", report.new.len());
    info!("Updated postings: {}", report.updated.len());
    if !report.removed.is_empty() {
        info!("No longer listed: {}", report.removed.join(", "));
    }
    for line in change_lines(report) {
        info!("  {}", line);
    }
}
