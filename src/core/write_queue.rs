//! Serialized document writes.
//!
//! Several overviews (and the edit panel) may want to rewrite the same
//! document. Edits are queued per path and applied in order against the
//! latest text in one read-modify-write, so no edit is computed from a stale
//! copy of the document.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::core::blocks::write_config_block;
use crate::core::error::OverviewError;
use crate::core::events::VaultEvent;
use crate::core::link_list::{remove_link_list, write_link_list};
use crate::core::vault::MemoryVault;
use crate::models::OverviewConfig;

/// One pending rewrite of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum TextEdit {
    /// Replace the overview's configuration block
    ConfigBlock {
        config: OverviewConfig,
        add_link_list: bool,
        line_start: Option<usize>,
    },
    /// Replace the overview's link list
    LinkList {
        config: OverviewConfig,
        lines: Vec<String>,
    },
    /// Delete the overview's link list and its markers
    RemoveLinkList { config: OverviewConfig },
}

impl TextEdit {
    pub fn overview_id(&self) -> &str {
        match self {
            Self::ConfigBlock { config, .. }
            | Self::LinkList { config, .. }
            | Self::RemoveLinkList { config } => &config.id,
        }
    }

    /// Apply to `text`; `Ok(None)` when the target region is not present.
    pub fn apply(&self, text: &str) -> Result<Option<String>, OverviewError> {
        match self {
            Self::ConfigBlock {
                config,
                add_link_list,
                line_start,
            } => write_config_block(text, config, *add_link_list, *line_start),
            Self::LinkList { config, lines } => Ok(write_link_list(text, config, lines)),
            Self::RemoveLinkList { config } => Ok(remove_link_list(text, config)),
        }
    }
}

/// Apply edits in order. Edits whose target is missing are skipped.
///
/// Returns `Ok(None)` if no edit applied.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<Option<String>, OverviewError> {
    let mut current: Option<String> = None;
    for edit in edits {
        let base = current.as_deref().unwrap_or(text);
        match edit.apply(base)? {
            Some(next) => current = Some(next),
            None => debug!(id = edit.overview_id(), "edit target not found, skipping"),
        }
    }
    Ok(current)
}

/// Per-document FIFO of pending edits.
#[derive(Clone, Debug, Default)]
pub struct WriteQueue {
    pending: HashMap<String, VecDeque<TextEdit>>,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &str, edit: TextEdit) {
        self.pending.entry(path.to_string()).or_default().push_back(edit);
    }

    /// Drain the queue for `path`, oldest first.
    pub fn take(&mut self, path: &str) -> Vec<TextEdit> {
        self.pending
            .remove(path)
            .map(Vec::from)
            .unwrap_or_default()
    }

    pub fn is_pending(&self, path: &str) -> bool {
        self.pending.get(path).is_some_and(|q| !q.is_empty())
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.pending.keys().cloned().collect();
        paths.sort();
        paths
    }
}

/// Write every queued edit for `path` to the vault in one pass.
///
/// Returns the modification event when the text changed.
pub fn flush(
    queue: &mut WriteQueue,
    vault: &mut MemoryVault,
    path: &str,
    now: u64,
) -> Result<Option<VaultEvent>, OverviewError> {
    let edits = queue.take(path);
    if edits.is_empty() {
        return Ok(None);
    }

    let text = vault
        .read(path)
        .ok_or_else(|| OverviewError::DocumentNotFound(path.to_string()))?;
    match apply_edits(text, &edits)? {
        Some(updated) => vault.process(path, now, |_| Some(updated)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blocks::locate_blocks;
    use crate::core::link_list::marker_block;
    use crate::models::{ManifestFile, VaultManifest};

    fn config() -> OverviewConfig {
        OverviewConfig {
            id: "ov".into(),
            hide_link_list: false,
            ..OverviewConfig::default()
        }
    }

    fn vault_with(text: &str) -> MemoryVault {
        MemoryVault::from_manifest(&VaultManifest {
            files: vec![ManifestFile {
                path: "home.md".into(),
                content: text.into(),
                created: 1,
                modified: 1,
            }],
            folders: vec![],
        })
    }

    #[test]
    fn test_queue_fifo_per_path() {
        let mut queue = WriteQueue::new();
        queue.push("a.md", TextEdit::RemoveLinkList { config: config() });
        queue.push(
            "a.md",
            TextEdit::LinkList {
                config: config(),
                lines: vec![],
            },
        );
        queue.push("b.md", TextEdit::RemoveLinkList { config: config() });

        assert_eq!(queue.paths(), vec!["a.md", "b.md"]);
        let edits = queue.take("a.md");
        assert!(matches!(edits[0], TextEdit::RemoveLinkList { .. }));
        assert!(matches!(edits[1], TextEdit::LinkList { .. }));
        assert!(!queue.is_pending("a.md"));
        assert!(queue.is_pending("b.md"));
    }

    #[test]
    fn test_edits_compose() {
        let text = "```folder-overview\nid: ov\n```";
        let edits = vec![
            TextEdit::ConfigBlock {
                config: OverviewConfig {
                    depth: 2,
                    ..config()
                },
                add_link_list: true,
                line_start: Some(0),
            },
            TextEdit::LinkList {
                config: config(),
                lines: vec!["- [[a.md|a]]".into()],
            },
        ];
        let updated = apply_edits(text, &edits).unwrap().unwrap();
        assert_eq!(locate_blocks(&updated)[0].config.depth, Some(2));
        assert!(updated.contains("\n- [[a.md|a]]\n"));
    }

    #[test]
    fn test_missing_targets_skip() {
        let edits = vec![TextEdit::RemoveLinkList { config: config() }];
        assert_eq!(apply_edits("plain text", &edits).unwrap(), None);
    }

    #[test]
    fn test_flush_writes_once() {
        let text = format!("```folder-overview\nid: ov\n```{}", marker_block("ov", false));
        let mut vault = vault_with(&text);
        let mut queue = WriteQueue::new();
        queue.push(
            "home.md",
            TextEdit::LinkList {
                config: config(),
                lines: vec!["- [[x.md|x]]".into()],
            },
        );

        let event = flush(&mut queue, &mut vault, "home.md", 9).unwrap();
        assert_eq!(
            event,
            Some(VaultEvent::Modified {
                path: "home.md".into()
            })
        );
        assert!(vault.read("home.md").unwrap().contains("- [[x.md|x]]"));
        assert_eq!(vault.get_file("home.md").unwrap().modified, 9);
        assert!(!queue.is_pending("home.md"));
        assert!(queue.paths().is_empty());

        // Nothing queued, nothing written
        assert_eq!(flush(&mut queue, &mut vault, "home.md", 10).unwrap(), None);
    }

    #[test]
    fn test_flush_unchanged_text_no_event() {
        let text = format!("```folder-overview\nid: ov\n```{}", marker_block("ov", false));
        let mut vault = vault_with(&text);
        let mut queue = WriteQueue::new();
        queue.push(
            "home.md",
            TextEdit::LinkList {
                config: config(),
                lines: vec![],
            },
        );
        assert_eq!(flush(&mut queue, &mut vault, "home.md", 2).unwrap(), None);
    }

    #[test]
    fn test_flush_missing_document() {
        let mut vault = vault_with("");
        let mut queue = WriteQueue::new();
        queue.push("gone.md", TextEdit::RemoveLinkList { config: config() });
        assert!(matches!(
            flush(&mut queue, &mut vault, "gone.md", 1),
            Err(OverviewError::DocumentNotFound(_))
        ));
    }
}
