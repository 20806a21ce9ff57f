//! Index of documents that host overview blocks.
//!
//! After vault mutations every indexed document gets its mirrored link lists
//! rebuilt, without reading documents that never had an overview. Entries
//! whose document is gone, or no longer holds a block, are pruned during the
//! resync.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::blocks::{has_overview_block, locate_blocks};
use crate::core::events::VaultEvent;
use crate::core::host::HostCollaborator;
use crate::core::overview::prepare;
use crate::core::settings::normalize;
use crate::core::vault::{MemoryVault, is_nested_path};
use crate::core::write_queue::TextEdit;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverviewIndex {
    paths: BTreeSet<String>,
}

impl OverviewIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every markdown document currently holding a block.
    pub fn build(vault: &MemoryVault) -> Self {
        let paths: BTreeSet<String> = vault
            .markdown_files()
            .into_iter()
            .filter(|file| vault.read(&file.path).is_some_and(has_overview_block))
            .map(|file| file.path.clone())
            .collect();
        debug!(documents = paths.len(), "overview index built");
        Self { paths }
    }

    pub fn add(&mut self, path: &str) -> bool {
        self.paths.insert(path.to_string())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Re-check one document against its current text.
    pub fn refresh(&mut self, vault: &MemoryVault, path: &str) {
        if vault.read(path).is_some_and(has_overview_block) {
            self.add(path);
        } else {
            self.remove(path);
        }
    }

    /// Keep the index in step with a vault event.
    ///
    /// Renaming a folder moves indexed documents beneath it.
    pub fn apply_event(&mut self, vault: &MemoryVault, event: &VaultEvent) {
        match event {
            VaultEvent::Created { path } | VaultEvent::Modified { path } => self.refresh(vault, path),
            VaultEvent::Deleted { path } => {
                self.paths
                    .retain(|p| p != path && !is_nested_path(p, path));
            }
            VaultEvent::Renamed { from, to } => {
                let moved: Vec<String> = self
                    .paths
                    .iter()
                    .filter(|p| *p == from || is_nested_path(p, from))
                    .cloned()
                    .collect();
                for old in moved {
                    self.paths.remove(&old);
                    let new = format!("{}{}", to, &old[from.len()..]);
                    self.refresh(vault, &new);
                }
                self.refresh(vault, to);
            }
        }
    }

    /// Drop documents that are gone or no longer hold a block.
    ///
    /// Returns how many entries were removed.
    pub fn prune(&mut self, vault: &MemoryVault) -> usize {
        let before = self.paths.len();
        self.paths
            .retain(|path| vault.read(path).is_some_and(has_overview_block));
        before - self.paths.len()
    }
}

/// Link-list edits for every indexed document.
///
/// Prunes stale entries first. Only overviews with `useActualLinks` whose
/// source folder resolves produce edits.
pub fn resync_edits<H: HostCollaborator + ?Sized>(
    index: &mut OverviewIndex,
    vault: &MemoryVault,
    host: &H,
) -> Vec<(String, TextEdit)> {
    let pruned = index.prune(vault);
    if pruned > 0 {
        debug!(pruned, "dropped stale overview documents");
    }

    let mut edits = Vec::new();
    for path in index.paths() {
        let Some(text) = vault.read(path) else {
            continue;
        };
        for block in locate_blocks(text) {
            let config = normalize(&block.config, host.default_overview(), path, host);
            if !config.use_actual_links || block.config.id.is_none() {
                continue;
            }
            match prepare(&config, path, host) {
                Ok(render) => {
                    if let Some(edit) = render.link_list_edit() {
                        edits.push((path.to_string(), edit));
                    }
                }
                Err(e) => debug!(path, error = %e, "skipping overview during resync"),
            }
        }
    }
    edits
}
