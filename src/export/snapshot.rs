use crate::parse::Posting;
use crate::reconcile::Snapshot;
use anyhow::{Context, Result as AnyhowResult};
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Loads the snapshot written by the previous run.
///
/// A missing file is a first run and yields an empty snapshot. A file that
/// exists but cannot be read or parsed is an error, so that a damaged
/// snapshot is never silently replaced.
///
/// # Arguments
///
/// * `path` - Location of the snapshot JSON file.
///
/// # Returns
///
/// * `Ok(Snapshot)` - The normalized previous postings, keyed by id.
/// * `Err(anyhow::Error)` - The file exists but is unreadable or not a JSON array of postings.
pub fn load_snapshot(path: &Path) -> AnyhowResult<Snapshot> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No snapshot at {}, starting fresh", path.display());
            return Ok(Snapshot::default());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read snapshot from {}", path.display()))
        }
    };
    let postings: Vec<Posting> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    let snapshot = Snapshot::from_postings(postings);
    info!("Loaded {} postings from {}", snapshot.len(), path.display());
    Ok(snapshot)
}

/// Writes postings as a pretty-printed JSON array, replacing the file wholesale.
///
/// The JSON is written to a sibling temporary file first and then renamed
/// over `path`, so the previous file stays intact if the write is
/// interrupted. Missing parent directories are created.
///
/// # Arguments
///
/// * `path` - Destination file.
/// * `postings` - Postings in the order they should appear in the file.
pub fn save_postings(path: &Path, postings: &[Posting]) -> AnyhowResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(postings).context("Failed to serialize postings")?;
    let staging = staging_path(path);
    fs::write(&staging, json)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to move {} into place", staging.display()))?;

    info!("Wrote {} postings to {}", postings.len(), path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: &str) -> Posting {
        Posting {
            institution: "Université Paris-Saclay".to_string(),
            department: "Physique".to_string(),
            posting_id: id.to_string(),
            title: "Postdoc".to_string(),
            deadline_raw: "(deadline 2024/11/01 11:59PM*)".to_string(),
            detail_url: format!("https://academicjobsonline.org/ajo/jobs/{}", id),
            application_materials: vec!["CV".to_string()],
            position_location: "Orsay, France".to_string(),
            subject_area: "Physics".to_string(),
            country: None,
        }
    }

    /// Tests that a missing snapshot file is an empty snapshot.
    #[test]
    fn test_load_snapshot_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load_snapshot(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.is_empty());
    }

    /// Tests that a corrupt snapshot is reported instead of ignored.
    #[test]
    fn test_load_snapshot_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_snapshot(&path).is_err());
    }

    /// Tests that a snapshot path that cannot be read is an error, not a first run.
    #[test]
    fn test_load_snapshot_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(load_snapshot(&blocker.join("physics_postdocs.json")).is_err());
        assert!(load_snapshot(dir.path()).is_err());
    }

    /// Tests the on-disk key names and that non-ASCII text is written as-is.
    #[test]
    fn test_save_postings_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("physics_postdocs.json");

        save_postings(&path, &[posting("7")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"job_id\": \"7\""));
        assert!(content.contains("\"job_url\""));
        assert!(content.contains("\"deadline\": \"(deadline 2024/11/01 11:59PM*)\""));
        assert!(content.contains("Université"));
        assert!(!content.contains("country"));
        assert!(!staging_path(&path).exists());
    }

    /// Tests that a saved file loads back into an equivalent snapshot.
    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "[]").unwrap();

        save_postings(&path, &[posting("1"), posting("2")]).unwrap();
        let snapshot = load_snapshot(&path).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("2"), Some(&posting("2")));
    }

    /// Tests loading a snapshot written by the location cleanup step.
    #[test]
    fn test_load_snapshot_with_country() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"[{"institution": "IBS", "department": "", "job_id": " 9 ", "title": "Fellow",
                "deadline": "(filled)", "job_url": "https://academicjobsonline.org/ajo/jobs/9",
                "application_materials": ["b", "a"], "position_location": "Daejeon",
                "subject_area": "", "country": "Republic of Korea"}]"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        let posting = snapshot.get("9").unwrap();
        assert_eq!(posting.application_materials, vec!["a", "b"]);
        assert_eq!(posting.country.as_deref(), Some("Republic of Korea"));
    }
}
