//! Output module for presenting the shelf
//!
//! This module handles:
//! - Building the page data set from the menu and the cache
//! - Rendering that data set as markdown
//! - Summarizing cycles and answering refresh requests

mod markdown;
mod page;
mod refresh;
pub mod stats;

pub use markdown::{format_markdown_page, write_markdown_page};
pub use page::collect_page_data;
pub use refresh::{RefreshResponse, STATUS_OK, STATUS_UNAVAILABLE};
pub use stats::{print_cycle_report, CycleSummary};
