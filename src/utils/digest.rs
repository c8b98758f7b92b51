use crate::parse::Posting;
use sha2::{Digest, Sha256};

/// Field separator fed to the hasher so adjacent fields cannot run together.
const SEPARATOR: &[u8] = &[0x1f];

/// Computes a digest of a posting's comparable content.
///
/// Covers exactly the fields used by the freshness check, so two postings
/// that compare as the same content share a digest. Downstream enrichment
/// such as `country` is left out.
///
/// # Returns
///
/// A hexadecimal string representation of the SHA-256 digest.
pub fn posting_digest(posting: &Posting) -> String {
    let mut hasher = Sha256::new();
    for field in [
        &posting.institution,
        &posting.department,
        &posting.posting_id,
        &posting.title,
        &posting.deadline_raw,
        &posting.detail_url,
        &posting.position_location,
        &posting.subject_area,
    ] {
        hasher.update(field.as_bytes());
        hasher.update(SEPARATOR);
    }
    for material in &posting.application_materials {
        hasher.update(material.as_bytes());
        hasher.update(SEPARATOR);
    }
    hex::encode(hasher.finalize())
}
