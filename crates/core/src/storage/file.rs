//! JSON snapshot file

use std::fs;
use std::path::{Path, PathBuf};

use tracing::instrument;

use super::SnapshotStore;
use crate::error::Result;
use crate::planner::Planner;

/// Planner document stored as pretty JSON on disk
#[derive(Debug, Clone)]
pub struct PlanFile {
    path: PathBuf,
}

impl PlanFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for PlanFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Planner> {
        if !self.path.exists() {
            tracing::debug!("No snapshot yet, starting empty");
            return Ok(Planner::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let planner = Planner::from_json(&content)?;
        tracing::debug!(events = planner.len(), "Snapshot loaded");
        Ok(planner)
    }

    #[instrument(skip(self, planner), fields(path = %self.path.display()))]
    fn save(&self, planner: &Planner) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target, then swap it in
        let temp = self.temp_path();
        fs::write(&temp, planner.to_json()?)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(events = planner.len(), "Snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{parse_date_time, Guest};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_planner() {
        let temp = TempDir::new().unwrap();
        let file = PlanFile::new(temp.path().join("events.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load() {
        let temp = TempDir::new().unwrap();
        let file = PlanFile::new(temp.path().join("nested").join("events.json"));

        let mut planner = Planner::new();
        let id = planner.create_event(
            "Tech Conf",
            parse_date_time("2024-05-01T18:00").unwrap(),
            "Hall A",
            2,
            3,
        );
        let event = planner.event_mut(id).unwrap();
        let jane = event.add_guest(Guest::new("Doe", "Jane"));
        event.add_guest(Guest::new("Roe", "Rick"));
        event.assign_from_pool(jane, 2, 1).unwrap();

        file.save(&planner).unwrap();
        assert!(file.path().exists());
        assert!(!file.temp_path().exists());

        let loaded = file.load().unwrap();
        assert_eq!(loaded.to_document(), planner.to_document());
    }

    #[test]
    fn test_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.json");
        fs::write(&path, "{ \"events\": [ { \"name\": 3 } ] }").unwrap();

        let err = PlanFile::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }
}
