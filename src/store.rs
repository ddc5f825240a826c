use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::record::HotlistRecord;

/// Durable store: the full collection, pretty-printed as a single JSON
/// array in one file. Every save replaces the previous document.
pub struct HotlistStore {
    path: PathBuf,
}

impl HotlistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored collection.
    ///
    /// An absent file is an empty collection. A file that does not parse
    /// as a JSON array of records is also treated as empty, with a warning
    /// rather than an error: the next save overwrites it.
    pub fn load(&self) -> Vec<HotlistRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read data file: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HotlistRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "data file is not a hotlist array, starting empty: {e}"
                );
                Vec::new()
            }
        }
    }

    /// Persist the full collection, replacing the previous file contents.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous document intact.
    pub fn save(&self, records: &[HotlistRecord]) -> Result<()> {
        let body = serde_json::to_string_pretty(records).context("serialize hotlist")?;

        let mut tmp_name: OsString = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, body).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawHotlistItem, normalize, raw_item_json};
    use tempfile::TempDir;

    fn record(query_time: &str) -> HotlistRecord {
        let item: RawHotlistItem = serde_json::from_value(raw_item_json(query_time)).unwrap();
        normalize(item)
    }

    #[test]
    fn absent_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = HotlistStore::new(dir.path().join("data.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(HotlistStore::new(path).load().is_empty());
    }

    #[test]
    fn non_array_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"timestamp": 1}"#).unwrap();
        assert!(HotlistStore::new(path).load().is_empty());
    }

    #[test]
    fn save_then_load_restores_collection() {
        let dir = TempDir::new().unwrap();
        let store = HotlistStore::new(dir.path().join("data.json"));

        let records = vec![
            record("2024-01-01 00:01:00"),
            record("2024-01-01 00:00:00"),
        ];
        store.save(&records).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].timestamp, records[0].timestamp);
        assert_eq!(loaded[1].timestamp, records[1].timestamp);

        // No temp file left behind.
        assert!(!dir.path().join("data.json.tmp").exists());
    }
}
