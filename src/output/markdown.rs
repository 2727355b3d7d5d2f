//! Markdown rendering of the page data set
//!
//! One section per document, one list item per entry.

use crate::cache::DocumentSnapshot;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Writes the rendered page to a file
///
/// # Arguments
///
/// * `page` - Snapshots in display order
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_page(page: &[Arc<DocumentSnapshot>], output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_page(page);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats the page data set as markdown
pub fn format_markdown_page(page: &[Arc<DocumentSnapshot>]) -> String {
    let mut md = String::new();

    md.push_str("# Link Shelf\n\n");

    if page.is_empty() {
        md.push_str("_No documents cached yet._\n");
        return md;
    }

    // Table of contents
    for (index, snapshot) in page.iter().enumerate() {
        md.push_str(&format!(
            "{}. {} ({} links)\n",
            index + 1,
            section_title(&snapshot.name),
            snapshot.entry_count()
        ));
    }
    md.push('\n');

    for snapshot in page {
        md.push_str(&format!("## {}\n\n", section_title(&snapshot.name)));

        if snapshot.entries.is_empty() {
            md.push_str("_No links._\n\n");
            continue;
        }

        for (index, entry) in snapshot.entries.iter().enumerate() {
            let title = if entry.title.is_empty() {
                entry.url.as_str()
            } else {
                entry.title.as_str()
            };
            md.push_str(&format!("{}. [{}]({})\n", index + 1, title, entry.url));
        }
        md.push('\n');
        md.push_str(&format!(
            "_Fetched {}_\n\n",
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    md
}

/// Document name without its extension, used as a heading
fn section_title(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
