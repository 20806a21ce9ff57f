//! Host collaborator interface.
//!
//! Everything the overview pipeline needs from the surrounding application
//! goes through [`HostCollaborator`]: vault lookups, folder-note lookups,
//! exclusion markers, front matter and title resolution. The pipeline never
//! asks which host it runs in; a host without folder notes simply answers
//! `None`/`false` through the default methods.

use serde_yaml::Mapping;

use crate::core::frontmatter;
use crate::core::vault::{MemoryVault, is_nested_path, join_path, parent_path};
use crate::models::{FileNode, FolderNode, GlobalSettings, OverviewConfig, VaultEntry};

/// Capabilities consumed by the overview pipeline.
pub trait HostCollaborator {
    /// Vault entry lookup by path (`"/"` is the root folder).
    fn entry(&self, path: &str) -> Option<&VaultEntry>;

    /// Plugin-level default configuration.
    fn default_overview(&self) -> &OverviewConfig;

    fn folder(&self, path: &str) -> Option<&FolderNode> {
        self.entry(path).and_then(VaultEntry::as_folder)
    }

    fn file(&self, path: &str) -> Option<&FileNode> {
        self.entry(path).and_then(VaultEntry::as_file)
    }

    /// Representative note of a folder.
    fn folder_note(&self, _folder: &FolderNode) -> Option<&FileNode> {
        None
    }

    /// Folder a document is the representative note of.
    fn linked_folder(&self, _document: &str) -> Option<&FolderNode> {
        None
    }

    /// Whether an entry carries an "exclude from overview" marker.
    fn is_excluded(&self, _path: &str) -> bool {
        false
    }

    /// Front matter of a document.
    fn frontmatter(&self, _document: &str) -> Option<Mapping> {
        None
    }

    /// Third-party display title for a document.
    fn resolve_title(&self, _document: &str) -> Option<String> {
        None
    }

    /// Text of a document, for previews.
    fn read(&self, _document: &str) -> Option<&str> {
        None
    }
}

/// Host backed by the in-memory vault and the plugin settings.
pub struct VaultHost<'a> {
    vault: &'a MemoryVault,
    settings: &'a GlobalSettings,
}

impl<'a> VaultHost<'a> {
    pub fn new(vault: &'a MemoryVault, settings: &'a GlobalSettings) -> Self {
        Self { vault, settings }
    }
}

impl HostCollaborator for VaultHost<'_> {
    fn entry(&self, path: &str) -> Option<&VaultEntry> {
        self.vault.get_entry(path)
    }

    fn default_overview(&self) -> &OverviewConfig {
        &self.settings.default_overview
    }

    fn folder_note(&self, folder: &FolderNode) -> Option<&FileNode> {
        let notes = &self.settings.folder_notes;
        if !notes.enabled || folder.is_root() {
            return None;
        }
        let name = format!("{}.md", notes.note_basename(&folder.name));
        self.vault.get_file(&join_path(&folder.path, &name))
    }

    fn linked_folder(&self, document: &str) -> Option<&FolderNode> {
        let folder = self.vault.get_folder(&parent_path(document))?;
        let note = self.folder_note(folder)?;
        (note.path == document).then_some(folder)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.settings
            .excluded_from_overview
            .iter()
            .any(|excluded| path == excluded || is_nested_path(path, excluded))
    }

    fn frontmatter(&self, document: &str) -> Option<Mapping> {
        frontmatter::parse(self.vault.read(document)?)
    }

    fn resolve_title(&self, document: &str) -> Option<String> {
        let key = self.settings.folder_notes.title_property.as_deref()?;
        let map = self.frontmatter(document)?;
        let title = frontmatter::value_to_string(map.get(key)?);
        (!title.is_empty()).then_some(title)
    }

    fn read(&self, document: &str) -> Option<&str> {
        self.vault.read(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FolderNoteSettings, ManifestFile, VaultManifest};

    fn vault() -> MemoryVault {
        let file = |path: &str, content: &str| ManifestFile {
            path: path.into(),
            content: content.into(),
            created: 0,
            modified: 0,
        };
        MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                file("Projects/Projects.md", "---\ntitle: All Projects\n---\n"),
                file("Projects/plan.md", ""),
                file("Templates/daily.md", ""),
            ],
            folders: vec![],
        })
    }

    fn settings(enabled: bool) -> GlobalSettings {
        GlobalSettings {
            folder_notes: FolderNoteSettings {
                enabled,
                title_property: Some("title".into()),
                ..FolderNoteSettings::default()
            },
            excluded_from_overview: vec!["Templates".into()],
            ..GlobalSettings::default()
        }
    }

    #[test]
    fn test_folder_note_lookup() {
        let vault = vault();
        let settings = settings(true);
        let host = VaultHost::new(&vault, &settings);

        let folder = host.folder("Projects").unwrap();
        assert_eq!(host.folder_note(folder).unwrap().path, "Projects/Projects.md");
        assert_eq!(host.linked_folder("Projects/Projects.md").unwrap().path, "Projects");
        assert!(host.linked_folder("Projects/plan.md").is_none());
    }

    #[test]
    fn test_folder_notes_disabled() {
        let vault = vault();
        let settings = settings(false);
        let host = VaultHost::new(&vault, &settings);

        let folder = host.folder("Projects").unwrap();
        assert!(host.folder_note(folder).is_none());
        assert!(host.linked_folder("Projects/Projects.md").is_none());
    }

    #[test]
    fn test_exclusion_is_segment_aware() {
        let vault = vault();
        let settings = settings(true);
        let host = VaultHost::new(&vault, &settings);

        assert!(host.is_excluded("Templates"));
        assert!(host.is_excluded("Templates/daily.md"));
        assert!(!host.is_excluded("TemplatesOld"));
    }

    #[test]
    fn test_resolve_title_from_front_matter() {
        let vault = vault();
        let settings = settings(true);
        let host = VaultHost::new(&vault, &settings);

        assert_eq!(
            host.resolve_title("Projects/Projects.md").as_deref(),
            Some("All Projects")
        );
        assert!(host.resolve_title("Projects/plan.md").is_none());
    }
}
