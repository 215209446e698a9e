//! Storage traits
//!
//! The trait lets front ends swap the JSON file for an in-memory store in
//! tests.

use std::cell::RefCell;

use crate::error::Result;
use crate::models::PlannerDocument;
use crate::planner::Planner;

/// Load and save whole planner snapshots
pub trait SnapshotStore {
    /// Load the planner; an absent snapshot is an empty planner
    fn load(&self) -> Result<Planner>;

    /// Replace the stored snapshot
    fn save(&self, planner: &Planner) -> Result<()>;
}

/// Snapshot kept in memory as a document
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<PlannerDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved document, if any
    pub fn document(&self) -> Option<PlannerDocument> {
        self.document.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Planner> {
        match self.document.borrow().clone() {
            Some(document) => Planner::from_document(document),
            None => Ok(Planner::new()),
        }
    }

    fn save(&self, planner: &Planner) -> Result<()> {
        *self.document.borrow_mut() = Some(planner.to_document());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date_time;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.document().is_none());
    }

    #[test]
    fn test_memory_store_save_load() {
        let store = MemoryStore::new();
        let mut planner = Planner::new();
        planner.create_event(
            "Tech Conf",
            parse_date_time("2024-05-01T18:00").unwrap(),
            "Hall A",
            2,
            3,
        );

        store.save(&planner).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.events()[0].total_seats(), 6);
    }
}
