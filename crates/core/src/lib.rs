//! Seatplan Core Library
//!
//! Events with a seat grid, the guests placed on them, and the record
//! format used to persist both.

pub mod config;
pub mod error;
pub mod invariants;
pub mod models;
pub mod planner;
pub mod storage;

pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use models::*;
pub use planner::Planner;
pub use storage::{MemoryStore, PlanFile, SnapshotStore};
