use crate::parse::Posting;

/// Country names the site spells in a way that contains a comma.
const SPECIAL_COUNTRIES: [(&str, &str); 1] = [("Korea, The Republic of", "Republic of Korea")];

/// Splits a position location into `(location, country)`.
///
/// The `[map]` link text is removed first. Known comma-containing country
/// names are matched explicitly; otherwise the last comma-separated part is
/// the country and the remaining parts form the location.
///
/// # Examples
///
/// ```rust
/// use postdoc_crawler::export::split_country;
/// assert_eq!(
///     split_country("Garching, Bavaria, Germany [map]"),
///     ("Garching, Bavaria".to_string(), "Germany".to_string())
/// );
/// ```
pub fn split_country(position_location: &str) -> (String, String) {
    let cleaned = position_location.replace("[map]", "");
    let cleaned = cleaned.trim();

    for (spelling, country) in SPECIAL_COUNTRIES {
        if cleaned.contains(spelling) {
            let location = cleaned
                .replace(spelling, "")
                .trim_matches(|c: char| c == ',' || c == ' ')
                .trim()
                .to_string();
            return (location, country.to_string());
        }
    }

    let mut parts: Vec<&str> = cleaned.split(',').map(str::trim).collect();
    let country = parts.pop().unwrap_or_default().to_string();
    (parts.join(", ").trim().to_string(), country)
}

/// Returns copies of the postings with `country` filled in and the location cleaned.
pub fn with_country(postings: &[Posting]) -> Vec<Posting> {
    postings
        .iter()
        .cloned()
        .map(|mut posting| {
            let (location, country) = split_country(&posting.position_location);
            posting.position_location = location;
            posting.country = Some(country);
            posting
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_country_plain() {
        assert_eq!(
            split_country("Princeton, NJ, United States [map]"),
            ("Princeton, NJ".to_string(), "United States".to_string())
        );
        assert_eq!(split_country("Japan"), (String::new(), "Japan".to_string()));
    }

    #[test]
    fn test_split_country_special_case() {
        assert_eq!(
            split_country("Daejeon, Korea, The Republic of [map]"),
            ("Daejeon".to_string(), "Republic of Korea".to_string())
        );
    }

    #[test]
    fn test_split_country_empty() {
        assert_eq!(split_country(""), (String::new(), String::new()));
        assert_eq!(split_country(" [map] "), (String::new(), String::new()));
    }

    #[test]
    fn test_with_country() {
        let posting = Posting {
            institution: "MPI".to_string(),
            department: "Physics".to_string(),
            posting_id: "1".to_string(),
            title: "Postdoc".to_string(),
            deadline_raw: "(filled)".to_string(),
            detail_url: "https://academicjobsonline.org/ajo/jobs/1".to_string(),
            application_materials: Vec::new(),
            position_location: "Munich, Germany [map]".to_string(),
            subject_area: String::new(),
            country: None,
        };

        let published = with_country(&[posting.clone()]);

        assert_eq!(published[0].position_location, "Munich");
        assert_eq!(published[0].country.as_deref(), Some("Germany"));
        assert!(published[0].same_content(&Posting {
            position_location: "Munich".to_string(),
            ..posting
        }));
    }
}
