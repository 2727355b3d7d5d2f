//! Phases of a synchronization cycle
//!
//! A cycle moves `Idle -> Discovering -> FetchingAll -> Idle`, or straight
//! back to `Idle` when discovery fails.

use serde::Serialize;
use std::fmt;

/// Externally observable phase of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// No cycle is running
    #[default]
    Idle,

    /// Listing the documents at the source
    Discovering,

    /// Workers are fetching documents; waiting on the join barrier
    FetchingAll,
}

impl CyclePhase {
    /// Checks whether moving from this phase to `next` is a legal step
    pub fn can_transition_to(&self, next: CyclePhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Discovering)
                | (Self::Discovering, Self::FetchingAll)
                | (Self::Discovering, Self::Idle)
                | (Self::FetchingAll, Self::Idle)
        )
    }

    /// Returns true while a cycle is in flight
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::FetchingAll => "fetching_all",
        };
        f.write_str(s)
    }
}
