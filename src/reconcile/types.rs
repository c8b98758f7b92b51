use super::normalize::normalize_posting;
use crate::parse::Posting;
use std::collections::HashMap;

/// The persisted postings of the previous run, keyed by posting id.
///
/// Every posting is normalized on the way in, so comparisons against fresh
/// postings are insensitive to whitespace and list order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<String, Posting>,
}

impl Snapshot {
    /// Builds a snapshot from persisted postings. When an id repeats, the
    /// later posting replaces the earlier one.
    pub fn from_postings<I>(postings: I) -> Self
    where
        I: IntoIterator<Item = Posting>,
    {
        let entries = postings
            .into_iter()
            .map(normalize_posting)
            .map(|posting| (posting.posting_id.clone(), posting))
            .collect();
        Self { entries }
    }

    pub fn get(&self, posting_id: &str) -> Option<&Posting> {
        self.entries.get(posting_id)
    }

    pub fn contains(&self, posting_id: &str) -> bool {
        self.entries.contains_key(posting_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// How a fresh posting relates to the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    New,
    Updated,
    Unchanged,
}

/// Outcome of reconciling one crawl against the previous snapshot.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Every posting of the next snapshot, ordered by ascending deadline.
    pub postings: Vec<Posting>,
    pub new: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    /// Ids that were in the previous snapshot but not in this crawl. They are
    /// not carried forward; the list is informational.
    pub removed: Vec<String>,
    classes: HashMap<String, Classification>,
}

impl ReconcileReport {
    /// Records a crawled posting id under its classification.
    pub(crate) fn record(&mut self, posting_id: String, class: Classification) {
        let ids = match class {
            Classification::New => &mut self.new,
            Classification::Updated => &mut self.updated,
            Classification::Unchanged => &mut self.unchanged,
        };
        ids.push(posting_id.clone());
        self.classes.insert(posting_id, class);
    }

    /// Classification recorded for `posting_id`, if it was part of the crawl.
    pub fn classification(&self, posting_id: &str) -> Option<Classification> {
        self.classes.get(posting_id).copied()
    }
}
