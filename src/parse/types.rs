use serde::{Deserialize, Serialize};

/// One canonical job posting, as persisted in the snapshot file.
///
/// Field names on disk follow the long-standing snapshot format
/// (`job_id`, `deadline`, `job_url`), so older snapshot files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub institution: String,
    pub department: String,
    /// Stable identifier scraped from the listing; the reconciliation key.
    #[serde(rename = "job_id")]
    pub posting_id: String,
    pub title: String,
    /// Deadline text exactly as shown on the listing, e.g. `(deadline 2024/11/01 11:59PM*)`.
    #[serde(rename = "deadline")]
    pub deadline_raw: String,
    #[serde(rename = "job_url")]
    pub detail_url: String,
    #[serde(default)]
    pub application_materials: Vec<String>,
    #[serde(default)]
    pub position_location: String,
    #[serde(default)]
    pub subject_area: String,
    /// Appended by location cleanup; never part of the freshness check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Posting {
    /// Compares every crawled field, ignoring downstream enrichment such as `country`.
    pub fn same_content(&self, other: &Posting) -> bool {
        self.institution == other.institution
            && self.department == other.department
            && self.posting_id == other.posting_id
            && self.title == other.title
            && self.deadline_raw == other.deadline_raw
            && self.detail_url == other.detail_url
            && self.application_materials == other.application_materials
            && self.position_location == other.position_location
            && self.subject_area == other.subject_area
    }
}

/// Optional sections pulled from a posting's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub application_materials: Vec<String>,
    pub position_location: String,
    pub subject_area: String,
}
