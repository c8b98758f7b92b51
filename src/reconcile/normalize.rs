use crate::parse::Posting;

/// Brings a posting into canonical form.
///
/// Trims every string field (including each application material and the
/// optional country) and sorts the application materials, so that postings
/// differing only in whitespace or list order compare equal. Normalizing an
/// already normalized posting returns it unchanged.
pub fn normalize_posting(mut posting: Posting) -> Posting {
    for field in [
        &mut posting.institution,
        &mut posting.department,
        &mut posting.posting_id,
        &mut posting.title,
        &mut posting.deadline_raw,
        &mut posting.detail_url,
        &mut posting.position_location,
        &mut posting.subject_area,
    ] {
        trim_in_place(field);
    }
    if let Some(country) = posting.country.as_mut() {
        trim_in_place(country);
    }
    posting.application_materials.iter_mut().for_each(trim_in_place);
    posting.application_materials.sort();
    posting
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
