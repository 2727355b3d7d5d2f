//! Synchronization engine
//!
//! This module contains the core logic that keeps the cache current:
//! - Link parsing of document text
//! - The per-document fetch worker and its staleness check
//! - Cycle orchestration (discovery, fan-out, join)
//! - The `Shelf` handle used at startup and for on-demand refreshes

mod orchestrator;
pub mod parser;
mod shelf;
mod worker;

pub use orchestrator::{filter_menu, CycleReport, Orchestrator};
pub use parser::parse_entries;
pub use shelf::Shelf;
pub use worker::FetchWorker;
