//! Snapshot storage for planners
//!
//! A snapshot is the whole planner document written at once. There is no
//! query layer: front ends load, mutate in memory, and save.

mod file;
mod traits;

pub use file::PlanFile;
pub use traits::{MemoryStore, SnapshotStore};
