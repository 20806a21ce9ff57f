//! Traversal phase of the render pipeline.
//!
//! Walks the filtered, sorted vault tree and produces plain values
//! ([`OverviewNode`], [`Card`]) that the components render. Nothing here
//! touches the UI, so every style can be checked in unit tests.
//!
//! - List style: [`TreeBuilder::build_list`] materializes the whole tree
//!   down to the depth bound.
//! - Explorer style: [`TreeBuilder::explorer_level`] materializes one level;
//!   collapsed folders carry no children until expanded.
//! - Grid style: [`TreeBuilder::build_cards`] yields one card per entry of
//!   the source folder.

use crate::config::PREVIEW_CHARS;
use crate::core::filter::{
    FilterScope, PathBlacklist, admits, collect_folder_notes, entry_depth, select,
};
use crate::core::frontmatter;
use crate::core::host::HostCollaborator;
use crate::core::sort::sort_entries;
use crate::models::{FileNode, FolderNode, OverviewConfig, VaultEntry};

// =============================================================================
// Output Types
// =============================================================================

/// A folder as displayed by an overview.
#[derive(Clone, Debug, PartialEq)]
pub struct FolderItem {
    pub path: String,
    pub name: String,
    pub display_name: String,
    /// Path of the folder's representative note
    pub folder_note: Option<String>,
    pub collapsed: bool,
    /// Whether the folder shows a collapse toggle
    pub expandable: bool,
    /// Materialized children (empty while collapsed in explorer style)
    pub children: Vec<OverviewNode>,
}

/// A file as displayed by an overview.
#[derive(Clone, Debug, PartialEq)]
pub struct FileItem {
    pub path: String,
    pub basename: String,
    pub display_name: String,
    /// Extension tag for non-markdown files
    pub tag: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverviewNode {
    Folder(FolderItem),
    File(FileItem),
}

impl OverviewNode {
    pub fn path(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.path,
            Self::File(file) => &file.path,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.display_name,
            Self::File(file) => &file.display_name,
        }
    }
}

/// One card of the grid style.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub path: String,
    pub title: String,
    pub is_folder: bool,
    /// Note opened when the card is clicked, for folders with a folder note
    pub link: Option<String>,
    pub tag: Option<String>,
    pub modified: Option<u64>,
}

// =============================================================================
// Tree Builder
// =============================================================================

/// One render pass over a source folder.
///
/// The folder-note blacklist is collected once when the builder is created.
pub struct TreeBuilder<'a, H: HostCollaborator + ?Sized> {
    host: &'a H,
    config: &'a OverviewConfig,
    source: &'a FolderNode,
    self_path: Option<&'a str>,
    blacklist: PathBlacklist,
}

impl<'a, H: HostCollaborator + ?Sized> TreeBuilder<'a, H> {
    pub fn new(
        host: &'a H,
        config: &'a OverviewConfig,
        source: &'a FolderNode,
        self_path: Option<&'a str>,
    ) -> Self {
        let blacklist = collect_folder_notes(source, config.depth, host);
        Self {
            host,
            config,
            source,
            self_path,
            blacklist,
        }
    }

    fn scope(&self, depth: u32) -> FilterScope<'_> {
        FilterScope {
            source_folder: &self.source.path,
            depth,
            blacklist: &self.blacklist,
            config: self.config,
            self_path: self.self_path,
        }
    }

    /// Filtered and sorted children of a folder.
    pub fn children(&self, folder: &'a FolderNode) -> Vec<&'a VaultEntry> {
        let mut entries = select(&folder.children, &self.scope(self.config.depth), self.host);
        sort_entries(&mut entries, self.config);
        entries
    }

    // =========================================================================
    // List Style
    // =========================================================================

    /// Full nested tree down to the depth bound.
    pub fn build_list(&self) -> Vec<OverviewNode> {
        self.list_level(self.source)
    }

    fn list_level(&self, folder: &'a FolderNode) -> Vec<OverviewNode> {
        self.children(folder)
            .into_iter()
            .filter_map(|entry| match entry {
                VaultEntry::Folder(sub) => self.show_folder(sub).then(|| {
                    let children = self.list_level(sub);
                    OverviewNode::Folder(self.folder_item(sub, false, children))
                }),
                VaultEntry::File(file) => Some(OverviewNode::File(self.file_item(file))),
            })
            .collect()
    }

    // =========================================================================
    // Explorer Style
    // =========================================================================

    /// One level of the explorer tree; expanded folders recurse.
    pub fn explorer_level(&self, folder: &'a FolderNode) -> Vec<OverviewNode> {
        self.children(folder)
            .into_iter()
            .filter_map(|entry| match entry {
                VaultEntry::Folder(sub) => self.show_folder(sub).then(|| {
                    let collapsed = self.is_collapsed(sub);
                    let children = if collapsed {
                        Vec::new()
                    } else {
                        self.explorer_level(sub)
                    };
                    OverviewNode::Folder(self.folder_item(sub, collapsed, children))
                }),
                VaultEntry::File(file) => Some(OverviewNode::File(self.file_item(file))),
            })
            .collect()
    }

    /// Explorer tree of the source folder.
    pub fn build_explorer(&self) -> Vec<OverviewNode> {
        self.explorer_level(self.source)
    }

    /// Children of one folder when it is expanded, ignoring its stored flag.
    pub fn expand(&self, path: &str) -> Vec<OverviewNode> {
        match self.host.folder(path) {
            Some(folder) => self.explorer_level(folder),
            None => Vec::new(),
        }
    }

    fn is_collapsed(&self, folder: &FolderNode) -> bool {
        self.config.always_collapse || (self.config.store_folder_condition && folder.collapsed)
    }

    // =========================================================================
    // Grid Style
    // =========================================================================

    /// One card per entry of the source folder.
    pub fn build_cards(&self) -> Vec<Card> {
        self.children(self.source)
            .into_iter()
            .filter_map(|entry| match entry {
                VaultEntry::Folder(folder) => self.show_folder(folder).then(|| {
                    let item = self.folder_item(folder, true, Vec::new());
                    Card {
                        path: item.path,
                        title: item.display_name,
                        is_folder: true,
                        link: item.folder_note,
                        tag: None,
                        modified: None,
                    }
                }),
                VaultEntry::File(file) => {
                    let item = self.file_item(file);
                    Some(Card {
                        path: item.path,
                        title: item.display_name,
                        is_folder: false,
                        link: Some(file.path.clone()),
                        tag: item.tag,
                        modified: Some(file.modified),
                    })
                }
            })
            .collect()
    }

    // =========================================================================
    // Empty-Folder Policy
    // =========================================================================

    /// Whether an admitted folder is displayed.
    ///
    /// Folders with content always show. Empty ones show only with
    /// `showEmptyFolders`, and with `onlyIncludeSubfolders` only when they
    /// sit directly in the source folder.
    pub fn show_folder(&self, folder: &FolderNode) -> bool {
        if self.has_content(folder) || self.host.folder_note(folder).is_some() {
            return true;
        }
        if !self.config.show_empty_folders {
            return false;
        }
        !self.config.only_include_subfolders || entry_depth(&folder.path, &self.source.path) == 1
    }

    /// Whether a folder has any admitted file, or a displayed subfolder,
    /// at any depth.
    fn has_content(&self, folder: &FolderNode) -> bool {
        let unbounded = self.scope(u32::MAX);
        folder.children.iter().any(|child| {
            admits(child, &unbounded, self.host)
                && match child {
                    VaultEntry::File(_) => true,
                    VaultEntry::Folder(sub) => self.show_folder(sub),
                }
        })
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn folder_item(&self, folder: &FolderNode, collapsed: bool, children: Vec<OverviewNode>) -> FolderItem {
        let note = self.host.folder_note(folder);
        let display_name = note
            .filter(|_| self.config.fmtp_integration)
            .and_then(|n| self.host.resolve_title(&n.path))
            .unwrap_or_else(|| folder.name.clone());
        let expandable = !(self.config.disable_collapse_icon && note.is_some() && !self.has_content(folder));

        FolderItem {
            path: folder.path.clone(),
            name: folder.name.clone(),
            display_name,
            folder_note: note.map(|n| n.path.clone()),
            collapsed,
            expandable,
            children,
        }
    }

    fn file_item(&self, file: &FileNode) -> FileItem {
        let display_name = self
            .config
            .fmtp_integration
            .then(|| self.host.resolve_title(&file.path))
            .flatten()
            .unwrap_or_else(|| file.basename.clone());
        let tag = (!self.config.disable_file_tag && !file.is_markdown())
            .then(|| file.extension.to_lowercase());

        FileItem {
            path: file.path.clone(),
            basename: file.basename.clone(),
            display_name,
            tag,
        }
    }
}

// =============================================================================
// Grid Previews
// =============================================================================

/// First characters of a document body, front matter stripped.
pub fn content_preview(text: &str) -> String {
    let body = frontmatter::strip(text).trim();
    let mut preview: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::VaultHost;
    use crate::core::vault::MemoryVault;
    use crate::models::{
        FolderNoteSettings, GlobalSettings, IncludeType, ManifestFile, ManifestFolder,
        VaultManifest,
    };

    fn file(path: &str, modified: u64) -> ManifestFile {
        ManifestFile {
            path: path.into(),
            content: String::new(),
            created: 0,
            modified,
        }
    }

    fn folder(path: &str, collapsed: bool) -> ManifestFolder {
        ManifestFolder {
            path: path.into(),
            collapsed,
        }
    }

    fn create_test_vault() -> MemoryVault {
        MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                file("Root/note.md", 3),
                file("Root/A/x.md", 1),
                file("Root/A/A.md", 1),
                file("Root/A/Deep/y.md", 1),
                file("Root/B/report.pdf", 2),
                file("Root/Noted/Noted.md", 1),
            ],
            folders: vec![
                folder("Root/Empty", false),
                folder("Root/A/EmptyNested", false),
                folder("Root/B", true),
            ],
        })
    }

    fn settings() -> GlobalSettings {
        GlobalSettings {
            folder_notes: FolderNoteSettings {
                enabled: true,
                ..FolderNoteSettings::default()
            },
            ..GlobalSettings::default()
        }
    }

    fn config() -> OverviewConfig {
        OverviewConfig {
            include_types: vec![IncludeType::All],
            ..OverviewConfig::default()
        }
    }

    fn names(nodes: &[OverviewNode]) -> Vec<String> {
        nodes.iter().map(|n| n.display_name().to_string()).collect()
    }

    fn folder_item<'n>(nodes: &'n [OverviewNode], name: &str) -> &'n FolderItem {
        nodes
            .iter()
            .find_map(|n| match n {
                OverviewNode::Folder(f) if f.name == name => Some(f),
                _ => None,
            })
            .unwrap()
    }

    // =========================================================================
    // List Style Tests
    // =========================================================================

    #[test]
    fn test_build_list_nested() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config();
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_list();
        assert_eq!(names(&tree), vec!["A", "B", "Noted", "note"]);

        let a = folder_item(&tree, "A");
        assert_eq!(a.folder_note.as_deref(), Some("Root/A/A.md"));
        // Folder note hidden, empty subfolder hidden
        assert_eq!(names(&a.children), vec!["Deep", "x"]);
        assert_eq!(names(&folder_item(&a.children, "Deep").children), vec!["y"]);

        let b = folder_item(&tree, "B");
        match &b.children[0] {
            OverviewNode::File(f) => assert_eq!(f.tag.as_deref(), Some("pdf")),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn test_build_list_depth_bound() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            depth: 1,
            ..config()
        };
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_list();
        // A still counts as non-empty although its files are beyond the bound
        assert_eq!(names(&tree), vec!["A", "B", "Noted", "note"]);
        assert!(folder_item(&tree, "A").children.is_empty());
    }

    #[test]
    fn test_empty_folder_visibility() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let source = vault.get_folder("Root").unwrap();

        let hidden = config();
        let tree = TreeBuilder::new(&host, &hidden, source, None).build_list();
        assert!(!names(&tree).contains(&"Empty".to_string()));

        let first_level = OverviewConfig {
            show_empty_folders: true,
            only_include_subfolders: true,
            ..config()
        };
        let tree = TreeBuilder::new(&host, &first_level, source, None).build_list();
        assert!(names(&tree).contains(&"Empty".to_string()));
        let a = folder_item(&tree, "A");
        assert!(!names(&a.children).contains(&"EmptyNested".to_string()));

        let all = OverviewConfig {
            show_empty_folders: true,
            ..config()
        };
        let tree = TreeBuilder::new(&host, &all, source, None).build_list();
        let a = folder_item(&tree, "A");
        assert!(names(&a.children).contains(&"EmptyNested".to_string()));
    }

    #[test]
    fn test_folder_with_only_note_is_shown_without_toggle() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config();
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_list();
        let noted = folder_item(&tree, "Noted");
        assert!(noted.children.is_empty());
        assert!(!noted.expandable);
        assert!(folder_item(&tree, "A").expandable);
    }

    #[test]
    fn test_files_only_flattens() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            include_types: vec![IncludeType::Markdown],
            ..OverviewConfig::default()
        };
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_list();
        assert!(tree.iter().all(|n| matches!(n, OverviewNode::File(_))));
        assert_eq!(names(&tree), vec!["note", "x", "y"]);
    }

    // =========================================================================
    // Explorer Style Tests
    // =========================================================================

    #[test]
    fn test_explorer_respects_stored_collapse() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            style: crate::models::OverviewStyle::Explorer,
            ..config()
        };
        let source = vault.get_folder("Root").unwrap();
        let builder = TreeBuilder::new(&host, &config, source, None);

        let tree = builder.build_explorer();
        let b = folder_item(&tree, "B");
        assert!(b.collapsed);
        assert!(b.children.is_empty());
        let a = folder_item(&tree, "A");
        assert!(!a.collapsed);
        assert_eq!(names(&a.children), vec!["Deep", "x"]);

        // Lazy expansion materializes only the requested folder
        assert_eq!(names(&builder.expand("Root/B")), vec!["report"]);
        assert!(builder.expand("Root/missing").is_empty());
    }

    #[test]
    fn test_explorer_always_collapse() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            always_collapse: true,
            ..config()
        };
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_explorer();
        for node in &tree {
            if let OverviewNode::Folder(f) = node {
                assert!(f.collapsed, "{} should be collapsed", f.path);
                assert!(f.children.is_empty());
            }
        }
    }

    #[test]
    fn test_explorer_ignores_stored_flag_when_not_persisting() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            store_folder_condition: false,
            ..config()
        };
        let source = vault.get_folder("Root").unwrap();

        let tree = TreeBuilder::new(&host, &config, source, None).build_explorer();
        assert!(!folder_item(&tree, "B").collapsed);
    }

    // =========================================================================
    // Grid Style Tests
    // =========================================================================

    #[test]
    fn test_build_cards_one_level() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config();
        let source = vault.get_folder("Root").unwrap();

        let cards = TreeBuilder::new(&host, &config, source, None).build_cards();
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "Noted", "note"]);
        assert!(cards[0].is_folder);
        assert_eq!(cards[0].link.as_deref(), Some("Root/A/A.md"));
        assert_eq!(cards[3].modified, Some(3));
        assert_eq!(cards[3].link.as_deref(), Some("Root/note.md"));
    }

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("---\ntitle: x\n---\n\n# Hello\n"), "# Hello");
        let long = "é".repeat(PREVIEW_CHARS + 10);
        let preview = content_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    // =========================================================================
    // Display Name Tests
    // =========================================================================

    #[test]
    fn test_fmtp_display_names() {
        let vault = MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                ManifestFile {
                    path: "P/P.md".into(),
                    content: "---\ntitle: Pretty Folder\n---\n".into(),
                    created: 0,
                    modified: 0,
                },
                ManifestFile {
                    path: "P/page.md".into(),
                    content: "---\ntitle: Pretty Page\n---\n".into(),
                    created: 0,
                    modified: 0,
                },
                ManifestFile {
                    path: "P/Sub/s.md".into(),
                    content: String::new(),
                    created: 0,
                    modified: 0,
                },
            ],
            folders: vec![],
        });
        let settings = GlobalSettings {
            folder_notes: FolderNoteSettings {
                enabled: true,
                title_property: Some("title".into()),
                ..FolderNoteSettings::default()
            },
            ..GlobalSettings::default()
        };
        let host = VaultHost::new(&vault, &settings);
        let config = OverviewConfig {
            fmtp_integration: true,
            ..config()
        };

        let root = vault.get_folder("/").unwrap();
        let tree = TreeBuilder::new(&host, &config, root, None).build_list();
        assert_eq!(names(&tree), vec!["Pretty Folder"]);
        let p = folder_item(&tree, "P");
        assert_eq!(names(&p.children), vec!["Sub", "Pretty Page"]);
    }
}
