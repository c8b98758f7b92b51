use crate::parse::{DetailFields, Posting};

/// A listing-page reference to a posting, before its detail page is fetched.
///
/// Candidates only exist for postings that already passed the relevance
/// predicate; the dispatcher turns each one into a `Posting`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub institution: String,
    pub department: String,
    /// Identifier shown in brackets next to the posting link, e.g. `12345` for `[12345]`.
    pub posting_id: String,
    pub title: String,
    /// Raw deadline text, or `No deadline specified` when the listing has none.
    pub deadline_raw: String,
    /// Absolute URL of the detail page.
    pub detail_url: String,
}

impl Candidate {
    /// Combines the listing data with the sections extracted from the detail page.
    pub fn into_posting(self, fields: DetailFields) -> Posting {
        Posting {
            institution: self.institution,
            department: self.department,
            posting_id: self.posting_id,
            title: self.title,
            deadline_raw: self.deadline_raw,
            detail_url: self.detail_url,
            application_materials: fields.application_materials,
            position_location: fields.position_location,
            subject_area: fields.subject_area,
            country: None,
        }
    }
}
