//! Loading submissions and the AZ map from disk.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::DeserializeOwned;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{InputError, InputResult};
use crate::types::{AzMap, ResourceCounts};

fn read_json<T: DeserializeOwned>(path: &Path) -> InputResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a resource-count submission.
pub fn load_counts(path: &Path) -> InputResult<ResourceCounts> {
    let counts: ResourceCounts = read_json(path)?;
    debug!(
        path = %path.display(),
        compute = counts.compute,
        storage = counts.object_storage,
        database = counts.database,
        regions = counts.candidate_regions.len(),
        "loaded submission"
    );
    Ok(counts)
}

pub fn load_az_map(path: &Path) -> InputResult<AzMap> {
    let map: AzMap = read_json(path)?;
    debug!(path = %path.display(), regions = map.len(), "loaded AZ map");
    Ok(map)
}

/// Find the most recently modified file in `dir` whose name ends with `suffix`.
///
/// Only the top level of `dir` is searched.
pub fn latest_input(dir: &Path, suffix: &str) -> InputResult<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| InputError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if !matches {
            continue;
        }
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if newest.as_ref().is_none_or(|(t, _)| modified >= *t) {
            newest = Some((modified, entry.into_path()));
        }
    }

    match newest {
        Some((_, path)) => {
            debug!(path = %path.display(), "selected newest input");
            Ok(path)
        }
        None => Err(InputError::NoInput {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const SUBMISSION: &str =
        r#"{"id": "u1", "ec2": 2, "s3": 1, "rds": 1, "top3_region": ["us-east-1"]}"#;

    #[test]
    fn load_counts_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u1_20250521_112331_input_data.json");
        fs::write(&path, SUBMISSION).unwrap();

        let counts = load_counts(&path).unwrap();
        assert_eq!(counts.compute, 2);
        assert_eq!(counts.candidate_regions, vec!["us-east-1".to_string()]);
    }

    #[test]
    fn load_counts_malformed_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_input_data.json");
        fs::write(&path, r#"{"ec2": "three"}"#).unwrap();

        assert!(matches!(load_counts(&path), Err(InputError::Parse { .. })));
    }

    #[test]
    fn load_counts_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_counts(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn latest_input_picks_newest_matching_file() {
        let dir = TempDir::new().unwrap();
        let older = dir.path().join("a_20250101_000000_input_data.json");
        let newer = dir.path().join("b_20250102_000000_input_data.json");
        fs::write(&older, SUBMISSION).unwrap();
        fs::write(dir.path().join("az_map.json"), "{}").unwrap();
        fs::write(&newer, SUBMISSION).unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&older)
            .unwrap()
            .set_modified(past)
            .unwrap();

        assert_eq!(latest_input(dir.path(), "_input_data.json").unwrap(), newer);
    }

    #[test]
    fn latest_input_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("final_data.json"), "{}").unwrap();

        let err = latest_input(dir.path(), "_input_data.json").unwrap_err();
        assert!(matches!(err, InputError::NoInput { .. }));
    }
}
