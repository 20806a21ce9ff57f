//! Overview blocks inside document text.
//!
//! An overview block is a fenced code block tagged `folder-overview` whose
//! body is the YAML configuration. Inside a callout every line carries a
//! `> ` prefix:
//!
//! ```text
//! > ```folder-overview
//! > id: 3f1c...
//! > depth: 2
//! > ```
//! ```
//!
//! Writes locate a block structurally, from the line it starts on, and fall
//! back to a search by overview id when that line no longer holds it.

use crate::config::{CALLOUT_PREFIX, CODE_BLOCK_LANG, MAX_CODE_BLOCK_SEARCH_LINES};
use crate::core::error::OverviewError;
use crate::core::link_list::{has_markers, marker_block};
use crate::core::settings::{new_overview_id, parse_block, serialize};
use crate::models::{OverviewConfig, PartialOverviewConfig};

const FENCE: &str = "```";

/// A block found in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedBlock {
    /// Line of the opening fence
    pub start_line: usize,
    /// Line of the closing fence
    pub end_line: usize,
    pub in_callout: bool,
    /// YAML body with any callout prefixes removed
    pub body: String,
    pub config: PartialOverviewConfig,
}

// =============================================================================
// Locating
// =============================================================================

/// Strip a callout prefix from a line, reporting whether one was present.
fn unquote(line: &str) -> (&str, bool) {
    if let Some(rest) = line.strip_prefix(CALLOUT_PREFIX) {
        (rest, true)
    } else if let Some(rest) = line.strip_prefix('>') {
        (rest, true)
    } else {
        (line, false)
    }
}

/// Whether `line` opens an overview block, and in which variant.
fn opening_fence(line: &str) -> Option<bool> {
    let (rest, quoted) = unquote(line);
    let lang = rest.trim_end().strip_prefix(FENCE)?;
    (lang == CODE_BLOCK_LANG).then_some(quoted)
}

/// Closing fence for the block opened at `start`.
///
/// Only a callout block may close on a `>`-prefixed fence. Scans at most
/// [`MAX_CODE_BLOCK_SEARCH_LINES`] lines. Reaching that bound or the end of
/// the document means the block is not closed.
pub fn find_code_block_end(lines: &[&str], start: usize, in_callout: bool) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .take(MAX_CODE_BLOCK_SEARCH_LINES)
        .find(|&(_, &line)| {
            let line = if in_callout { unquote(line).0 } else { line };
            line.trim_start().starts_with(FENCE)
        })
        .map(|(idx, _)| idx)
}

fn block_at(lines: &[&str], start: usize) -> Option<LocatedBlock> {
    let in_callout = opening_fence(lines.get(start)?)?;
    let end = find_code_block_end(lines, start, in_callout)?;

    let body = lines[start + 1..end]
        .iter()
        .map(|l| if in_callout { unquote(l).0 } else { l })
        .collect::<Vec<_>>()
        .join("\n");
    let mut config = parse_block(&body);
    config.is_in_callout = Some(in_callout);

    Some(LocatedBlock {
        start_line: start,
        end_line: end,
        in_callout,
        body,
        config,
    })
}

/// Every closed overview block in a document, in order.
pub fn locate_blocks(text: &str) -> Vec<LocatedBlock> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        match block_at(&lines, idx) {
            Some(block) => {
                idx = block.end_line + 1;
                blocks.push(block);
            }
            None => idx += 1,
        }
    }
    blocks
}

pub fn has_overview_block(text: &str) -> bool {
    !locate_blocks(text).is_empty()
}

/// A run of document text as displayed.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentSegment {
    Markdown(String),
    Overview(LocatedBlock),
}

/// Split a document into markdown runs and the overview blocks between them.
pub fn split_document(text: &str) -> Vec<DocumentSegment> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut segments = Vec::new();
    let mut cursor = 0;
    for block in locate_blocks(text) {
        if block.start_line > cursor {
            segments.push(DocumentSegment::Markdown(
                lines[cursor..block.start_line].join("\n"),
            ));
        }
        cursor = block.end_line + 1;
        segments.push(DocumentSegment::Overview(block));
    }
    if cursor < lines.len() {
        segments.push(DocumentSegment::Markdown(lines[cursor..].join("\n")));
    }
    segments
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a configuration as a complete block in its variant.
pub fn render_block(config: &OverviewConfig) -> Result<String, OverviewError> {
    let yaml = serialize(config)?;
    if !config.is_in_callout {
        return Ok(format!("{FENCE}{CODE_BLOCK_LANG}\n{yaml}{FENCE}"));
    }

    let mut block = format!("{CALLOUT_PREFIX}{FENCE}{CODE_BLOCK_LANG}\n");
    for line in yaml.lines() {
        block.push_str(CALLOUT_PREFIX);
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(CALLOUT_PREFIX);
    block.push_str(FENCE);
    Ok(block)
}

// =============================================================================
// Writing
// =============================================================================

/// Rewrite the block holding `config` in `text`.
///
/// `line_start` is where the block was last seen. It is trusted when it
/// still opens a block carrying the same id (or no id yet); otherwise every
/// block with the id is rewritten. Each block keeps its located variant.
/// With `add_link_list`, an empty link-list marker pair follows the block
/// unless one exists already.
///
/// Returns `Ok(None)` when the block cannot be found.
pub fn write_config_block(
    text: &str,
    config: &OverviewConfig,
    add_link_list: bool,
    line_start: Option<usize>,
) -> Result<Option<String>, OverviewError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let structural = line_start
        .and_then(|start| block_at(&lines, start))
        .filter(|block| {
            block
                .config
                .id
                .as_deref()
                .is_none_or(|id| id == config.id)
        });

    let targets = match structural {
        Some(block) => vec![block],
        None => locate_blocks(text)
            .into_iter()
            .filter(|block| block.config.id.as_deref() == Some(config.id.as_str()))
            .collect(),
    };
    if targets.is_empty() {
        return Ok(None);
    }

    let mut out: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    for block in targets.iter().rev() {
        let variant = OverviewConfig {
            is_in_callout: block.in_callout,
            ..config.clone()
        };
        let mut rendered = render_block(&variant)?;
        if add_link_list && !has_markers(text, &config.id, block.in_callout) {
            rendered.push_str(&marker_block(&config.id, block.in_callout));
        }
        out.splice(
            block.start_line..=block.end_line,
            rendered.split('\n').map(str::to_string),
        );
    }

    Ok(Some(out.join("\n")))
}

/// Insert a fresh overview at `cursor_line`.
///
/// Only applies when that line is blank (plain block) or holds a lone `>`
/// (callout block); returns `Ok(None)` otherwise. The new block copies
/// `defaults` under a new id and replaces the cursor line.
pub fn insert_overview(
    text: &str,
    cursor_line: usize,
    defaults: &OverviewConfig,
) -> Result<Option<String>, OverviewError> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let in_callout = match lines.get(cursor_line).map(|l| l.trim()) {
        Some("") => false,
        Some(">") => true,
        _ => return Ok(None),
    };

    let config = OverviewConfig {
        id: new_overview_id(),
        is_in_callout: in_callout,
        ..defaults.clone()
    };
    let block = render_block(&config)?;
    lines.splice(cursor_line..=cursor_line, block.split('\n'));
    Ok(Some(lines.join("\n")))
}
