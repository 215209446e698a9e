//! Application state management

use std::path::PathBuf;

use seatplan_core::{Error, EventId, PlanFile, Planner, PlannerConfig, Result, SnapshotStore};

/// Loaded configuration plus the planner it points at
pub struct AppState<S: SnapshotStore> {
    pub config: PlannerConfig,
    pub planner: Planner,
    store: S,
}

impl AppState<PlanFile> {
    /// Resolve config and snapshot paths, then load the planner.
    ///
    /// `data` and `config` override the platform defaults.
    pub fn open(data: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let config_path = match config {
            Some(path) => path,
            None => PlannerConfig::default_path()?,
        };
        let config = PlannerConfig::load(&config_path)?;

        let data_path = match data {
            Some(path) => path,
            None => config.data_path()?,
        };
        tracing::info!(
            config = %config_path.display(),
            data = %data_path.display(),
            "Opening planner"
        );

        Self::with_store(config, PlanFile::new(data_path))
    }
}

impl<S: SnapshotStore> AppState<S> {
    pub fn with_store(config: PlannerConfig, store: S) -> Result<Self> {
        let planner = store.load()?;
        Ok(Self {
            config,
            planner,
            store,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.planner)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve an event by name
    pub fn event_id(&self, name: &str) -> Result<EventId> {
        self.planner
            .find_by_name(name)
            .map(|e| e.id)
            .ok_or_else(|| Error::NotFound(format!("Event '{}'", name)))
    }
}
