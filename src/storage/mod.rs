//! Storage layer for Officina - one JSON snapshot file per period window.
//!
//! Snapshots are written whole on every save (temp file + rename) and read back
//! through the same validation an import goes through.

mod exchange;

use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::Period;
use crate::domain::Snapshot;
use crate::error::{PlannerError, Result};

pub use exchange::{export_file_name, export_snapshot, import_snapshot};

const SNAPSHOT_EXTENSION: &str = "json";

/// Directory-backed snapshot store keyed by period.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    base_path: PathBuf,
}

impl SnapshotStore {
    /// Open or create a store at the given directory.
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// `<data_local_dir>/officina/periods`, or `./.officina/periods` without one.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("officina"))
            .unwrap_or_else(|| PathBuf::from(".officina"))
            .join("periods")
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File path holding the snapshot of a period.
    fn snapshot_path(&self, period: &Period) -> PathBuf {
        self.base_path.join(format!("{}.{}", period.key(), SNAPSHOT_EXTENSION))
    }

    /// Persist a snapshot under its period, replacing any previous version.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.snapshot_path(&snapshot.period());
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, snapshot.to_json()?)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Saved snapshot {} ({} jobs)", path.display(), snapshot.jobs.len());
        Ok(path)
    }

    /// Load the snapshot of a period, if one was saved.
    pub fn load(&self, period: &Period) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path(period);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let snapshot = Snapshot::from_json(&content)
            .map_err(|e| PlannerError::Storage(format!("{}: {}", path.display(), e)))?;
        Ok(Some(snapshot))
    }

    /// Stored periods, oldest first.
    pub fn list(&self) -> Result<Vec<Period>> {
        let mut periods = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != SNAPSHOT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Period::from_key(stem) {
                Ok(period) => periods.push(period),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        periods.sort_by_key(|p| (p.start, p.end));
        Ok(periods)
    }

    /// The snapshot with the latest period.
    pub fn latest(&self) -> Result<Option<Snapshot>> {
        match self.list()?.last() {
            Some(period) => self.load(period),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Job, Team};
    use tempfile::TempDir;

    fn create_test_store() -> (SnapshotStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path().join("periods")).unwrap();
        (store, temp_dir)
    }

    fn snapshot(start: &str, end: &str) -> Snapshot {
        let mut snap = Snapshot::new(Period::parse(start, end).unwrap(), Team::default_roster());
        snap.jobs.push(Job::with_id("j1", "Ceroni - Clutch", 8.0));
        snap
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let snap = snapshot("2025-08-18", "2025-08-23");
        let path = store.save(&snap).unwrap();
        assert!(path.ends_with("2025-08-18_2025-08-23.json"));

        let loaded = store.load(&snap.period()).unwrap();
        assert_eq!(loaded, Some(snap));
    }

    #[test]
    fn test_load_missing_period() {
        let (store, _temp) = create_test_store();
        let period = Period::parse("2025-08-18", "2025-08-23").unwrap();
        assert_eq!(store.load(&period).unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let (store, _temp) = create_test_store();
        let mut snap = snapshot("2025-08-18", "2025-08-23");
        store.save(&snap).unwrap();
        snap.client_affinity.assign("ceroni", "M2");
        store.save(&snap).unwrap();

        let loaded = store.load(&snap.period()).unwrap().unwrap();
        assert_eq!(loaded.client_affinity.preferred("ceroni"), Some("M2"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_and_latest() {
        let (store, _temp) = create_test_store();
        store.save(&snapshot("2025-08-25", "2025-08-30")).unwrap();
        store.save(&snapshot("2025-08-18", "2025-08-23")).unwrap();
        fs::write(store.base_path().join("notes.txt"), "ignore me").unwrap();
        fs::write(store.base_path().join("garbage.json"), "{}").unwrap();

        let periods = store.list().unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].key(), "2025-08-18_2025-08-23");

        let latest = store.latest().unwrap().unwrap();
        assert_eq!(latest.period().key(), "2025-08-25_2025-08-30");
    }

    #[test]
    fn test_latest_empty_store() {
        let (store, _temp) = create_test_store();
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_storage_error() {
        let (store, _temp) = create_test_store();
        let period = Period::parse("2025-08-18", "2025-08-23").unwrap();
        fs::write(store.base_path().join(format!("{}.json", period.key())), "{ nope").unwrap();
        assert!(matches!(store.load(&period), Err(PlannerError::Storage(_))));
    }
}
