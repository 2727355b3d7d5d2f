//! State module for tracking synchronization progress
//!
//! # Components
//!
//! - `SyncOutcome`: result of one fetch worker (updated, unchanged, failed)
//! - `CyclePhase`: where the orchestrator currently is in its cycle

mod cycle;
mod outcome;

// Re-export main types
pub use cycle::CyclePhase;
pub use outcome::SyncOutcome;
