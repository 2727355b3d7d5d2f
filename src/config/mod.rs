//! Configuration module for Link-Shelf
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and reading the document source credential from the environment.
//!
//! # Example
//!
//! ```no_run
//! use link_shelf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf.toml")).unwrap();
//! println!("Menu extension: {}", config.sync.extension);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, GitHubConfig, LocalConfig, SourceConfig, StalenessCheck, SyncConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_token};
pub use validation::validate_token;
