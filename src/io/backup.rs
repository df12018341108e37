//! Timestamped copies of the store file
//!
//! A backup sits next to the file it copies and is named
//! `<stem>_backup_<YYYYMMDD_HHMMSS>` with the original extension kept.

use crate::types::RegistryError;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Path a backup of `store_path` taken at `timestamp` would be written to
pub fn backup_path(store_path: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let stem = store_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}_backup_{}", timestamp.format(BACKUP_TIMESTAMP_FORMAT));
    if let Some(ext) = store_path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    store_path.with_file_name(name)
}

/// Copy the store file to its timestamped backup path
///
/// Returns `Ok(None)` when there is nothing to back up.
///
/// # Errors
///
/// `Io` when the copy fails.
pub fn create_backup(
    store_path: &Path,
    timestamp: NaiveDateTime,
) -> Result<Option<PathBuf>, RegistryError> {
    if !store_path.is_file() {
        return Ok(None);
    }

    let destination = backup_path(store_path, timestamp);
    fs::copy(store_path, &destination)?;

    Ok(Some(destination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use tempfile::TempDir;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[rstest]
    #[case::csv("data/customers.csv", "data/customers_backup_20240305_091502.csv")]
    #[case::no_extension("store", "store_backup_20240305_091502")]
    #[case::dotted_stem("a/b.v2.csv", "a/b.v2_backup_20240305_091502.csv")]
    fn test_backup_path(#[case] store: &str, #[case] expected: &str) {
        assert_eq!(
            backup_path(Path::new(store), at(9, 15, 2)),
            PathBuf::from(expected)
        );
    }

    #[test]
    fn test_create_backup_copies_contents() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("customers.csv");
        fs::write(&store, "type,name\n").unwrap();

        let created = create_backup(&store, at(23, 59, 59)).unwrap().unwrap();

        assert_eq!(created, dir.path().join("customers_backup_20240305_235959.csv"));
        assert_eq!(fs::read_to_string(created).unwrap(), "type,name\n");
        assert!(store.exists());
    }

    #[test]
    fn test_create_backup_without_store_file() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("missing.csv");

        assert_eq!(create_backup(&store, at(0, 0, 0)).unwrap(), None);
    }

    #[test]
    fn test_create_backup_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("customers.csv");
        fs::write(&store, "x").unwrap();
        // occupy the destination with a directory so the copy cannot land
        fs::create_dir(backup_path(&store, at(1, 2, 3))).unwrap();

        assert!(matches!(
            create_backup(&store, at(1, 2, 3)),
            Err(RegistryError::Io { .. })
        ));
    }
}
