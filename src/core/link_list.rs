//! Mirrored link lists.
//!
//! When `useActualLinks` is on, an overview keeps a plain list of links to
//! everything it displays right below its block, so link graphs can see it.
//! The list is delimited by two marker spans carrying the overview id:
//!
//! ```text
//! <span class="fv-link-list-start" id="{id}"></span>
//! - [[Projects/plan.md|plan]]
//! - Archive
//! 	- [[Projects/Archive/old.md|old]]
//! <span class="fv-link-list-end" id="{id}"></span>
//! ```
//!
//! Markers are located by trimmed line equality. The region between them
//! (inclusive) is replaced wholesale; missing or misordered markers leave
//! the document untouched.

use crate::config::{CALLOUT_PREFIX, LINK_LIST_END_CLASS, LINK_LIST_ITEM_CLASS, LINK_LIST_START_CLASS};
use crate::core::tree::{FolderItem, OverviewNode};
use crate::models::OverviewConfig;

// =============================================================================
// Markers
// =============================================================================

fn prefix(callout: bool) -> &'static str {
    if callout { CALLOUT_PREFIX } else { "" }
}

pub fn start_marker(id: &str, callout: bool) -> String {
    format!(
        r#"{}<span class="{}" id="{}"></span>"#,
        prefix(callout),
        LINK_LIST_START_CLASS,
        id
    )
}

pub fn end_marker(id: &str, callout: bool) -> String {
    format!(
        r#"{}<span class="{}" id="{}"></span>"#,
        prefix(callout),
        LINK_LIST_END_CLASS,
        id
    )
}

/// Empty marker pair appended after a config block, newline first.
pub fn marker_block(id: &str, callout: bool) -> String {
    format!("\n{}\n{}", start_marker(id, callout), end_marker(id, callout))
}

/// Line indices of the start and end markers, if both exist in order.
fn find_markers(lines: &[&str], id: &str, callout: bool) -> Option<(usize, usize)> {
    let start = start_marker(id, callout);
    let end = end_marker(id, callout);
    let start_idx = lines.iter().position(|l| l.trim() == start)?;
    let end_idx = lines.iter().position(|l| l.trim() == end)?;
    (start_idx <= end_idx).then_some((start_idx, end_idx))
}

pub fn has_markers(text: &str, id: &str, callout: bool) -> bool {
    let lines: Vec<&str> = text.split('\n').collect();
    find_markers(&lines, id, callout).is_some()
}

// =============================================================================
// Link Lines
// =============================================================================

/// Build the link lines for a list-style tree.
pub fn build_lines(nodes: &[OverviewNode], config: &OverviewConfig) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(nodes, config, 0, &mut lines);
    lines
}

fn push_lines(nodes: &[OverviewNode], config: &OverviewConfig, indent: usize, out: &mut Vec<String>) {
    for node in nodes {
        let entry = match node {
            OverviewNode::File(file) => link(&file.path, &file.basename, config),
            OverviewNode::Folder(folder) => folder_entry(folder, config),
        };
        out.push(finish_line(&entry, indent, config));

        if let OverviewNode::Folder(folder) = node {
            push_lines(&folder.children, config, indent + 1, out);
        }
    }
}

fn folder_entry(folder: &FolderItem, config: &OverviewConfig) -> String {
    match &folder.folder_note {
        Some(note) => link(note, &folder.name, config),
        None => folder.name.clone(),
    }
}

fn link(path: &str, name: &str, config: &OverviewConfig) -> String {
    if config.use_wikilinks {
        format!("[[{}|{}]]", path, name)
    } else {
        format!("[{}]({})", name, path.replace(' ', "%20"))
    }
}

fn finish_line(entry: &str, indent: usize, config: &OverviewConfig) -> String {
    let mut line = format!(
        "{}{}- {}",
        prefix(config.is_in_callout),
        "\t".repeat(indent),
        entry
    );
    if config.hide_link_list {
        line.push_str(&format!(r#" <span class="{}"></span>"#, LINK_LIST_ITEM_CLASS));
    }
    line
}

// =============================================================================
// Rewriting
// =============================================================================

/// Replace the delimited region with fresh link lines.
///
/// Returns `None` when the markers are missing or out of order.
pub fn write_link_list(text: &str, config: &OverviewConfig, links: &[String]) -> Option<String> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let (start, end) = find_markers(&lines, &config.id, config.is_in_callout)?;

    let start_line = start_marker(&config.id, config.is_in_callout);
    let end_line = end_marker(&config.id, config.is_in_callout);
    let replacement = std::iter::once(start_line.as_str())
        .chain(links.iter().map(String::as_str))
        .chain(std::iter::once(end_line.as_str()));
    lines.splice(start..=end, replacement);

    Some(lines.join("\n"))
}

/// Delete the delimited region, markers included.
///
/// Returns `None` when the markers are missing or out of order.
pub fn remove_link_list(text: &str, config: &OverviewConfig) -> Option<String> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let (start, end) = find_markers(&lines, &config.id, config.is_in_callout)?;
    lines.drain(start..=end);
    Some(lines.join("\n"))
}

// =============================================================================
// Display
// =============================================================================

/// Markdown as shown to the reader: marker lines are dropped, and so are
/// link lines marked hidden.
pub fn strip_link_list_markup(markdown: &str) -> String {
    let start = format!(r#"<span class="{}""#, LINK_LIST_START_CLASS);
    let end = format!(r#"<span class="{}""#, LINK_LIST_END_CLASS);
    let hidden = format!(r#"<span class="{}"></span>"#, LINK_LIST_ITEM_CLASS);

    markdown
        .split('\n')
        .filter(|line| {
            let bare = line.trim().trim_start_matches('>').trim_start();
            !(bare.starts_with(&start) || bare.starts_with(&end) || bare.ends_with(&hidden))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
