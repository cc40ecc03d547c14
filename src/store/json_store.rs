use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{PriorityData, ProgressData};

/// JSON persistence for the completion record and priority list. The app
/// treats the store as optional: if it cannot be created, learning still
/// works, just without persistence.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kanjidr");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing, unreadable, or corrupt files fall back to the default —
    /// a broken store must never take the core down with it.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    /// Atomic write: stage to a .tmp file, fsync, rename into place.
    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_progress(&self) -> ProgressData {
        let data: ProgressData = self.load("progress.json");
        if data.needs_reset() {
            ProgressData::default()
        } else {
            data
        }
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save("progress.json", data)
    }

    pub fn load_priority(&self) -> PriorityData {
        let data: PriorityData = self.load("priority.json");
        if data.needs_reset() {
            PriorityData::default()
        } else {
            data
        }
    }

    pub fn save_priority(&self, data: &PriorityData) -> Result<()> {
        self.save("priority.json", data)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn fresh_store_loads_defaults() {
        let (_dir, store) = make_test_store();
        assert!(store.load_progress().completed.is_empty());
        assert!(store.load_priority().characters.is_empty());
    }

    #[test]
    fn progress_round_trip() {
        let (_dir, store) = make_test_store();
        let data = ProgressData {
            completed: vec![0, 2, 5],
            last_studied: Some(Utc::now()),
            ..ProgressData::default()
        };
        store.save_progress(&data).unwrap();

        let loaded = store.load_progress();
        assert_eq!(loaded.completed, vec![0, 2, 5]);
        assert!(loaded.last_studied.is_some());
    }

    #[test]
    fn priority_round_trip() {
        let (_dir, store) = make_test_store();
        let data = PriorityData {
            characters: vec!['食', '水'],
            ..PriorityData::default()
        };
        store.save_priority(&data).unwrap();
        assert_eq!(store.load_priority().characters, vec!['食', '水']);
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("progress.json"), "not json {").unwrap();
        assert!(store.load_progress().completed.is_empty());
    }

    #[test]
    fn stale_schema_version_resets() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.file_path("progress.json"),
            r#"{"schema_version": 99, "completed": [1, 2], "last_studied": null}"#,
        )
        .unwrap();
        assert!(store.load_progress().completed.is_empty());
    }

    #[test]
    fn save_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.save_progress(&ProgressData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty());
    }
}
