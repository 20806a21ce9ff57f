//! Filter engine.
//!
//! Decides which vault entries an overview displays: self-reference and
//! exclusion markers, containment in the source folder, folder-note
//! blacklisting, type admission and the depth bound.

use std::collections::HashSet;

use crate::core::host::HostCollaborator;
use crate::core::vault::{is_nested_path, is_root, parent_path};
use crate::models::{FileKind, FolderNode, IncludeType, OverviewConfig, VaultEntry};

// =============================================================================
// Path Blacklist
// =============================================================================

/// Paths suppressed from display, rebuilt for every render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathBlacklist(HashSet<String>);

impl PathBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collect the folder notes of `source` and every folder beneath it
/// within the depth bound.
pub fn collect_folder_notes<H: HostCollaborator + ?Sized>(
    source: &FolderNode,
    depth: u32,
    host: &H,
) -> PathBlacklist {
    let mut blacklist = PathBlacklist::new();
    let mut stack = vec![source];

    while let Some(folder) = stack.pop() {
        if let Some(note) = host.folder_note(folder) {
            blacklist.insert(note.path.clone());
        }
        for child in &folder.children {
            if let VaultEntry::Folder(sub) = child {
                if entry_depth(&sub.path, &source.path) <= depth as usize {
                    stack.push(sub);
                }
            }
        }
    }

    blacklist
}

// =============================================================================
// Filter Scope
// =============================================================================

/// Everything a filter pass needs besides the candidates themselves.
#[derive(Clone, Copy, Debug)]
pub struct FilterScope<'a> {
    /// Source folder path (`"/"` for the root)
    pub source_folder: &'a str,
    /// Maximum depth relative to the source folder
    pub depth: u32,
    pub blacklist: &'a PathBlacklist,
    pub config: &'a OverviewConfig,
    /// Document hosting the overview
    pub self_path: Option<&'a str>,
}

/// Whether a single entry passes every admission rule.
pub fn admits<H: HostCollaborator + ?Sized>(
    entry: &VaultEntry,
    scope: &FilterScope<'_>,
    host: &H,
) -> bool {
    let path = entry.path();

    if scope.self_path == Some(path) || host.is_excluded(path) {
        return false;
    }

    let parent = parent_path(path);
    let contained = is_root(scope.source_folder)
        || parent == scope.source_folder
        || is_nested_path(&parent, scope.source_folder);
    if !contained {
        return false;
    }

    if let VaultEntry::File(file) = entry {
        if !scope.config.show_folder_notes && scope.blacklist.contains(&file.path) {
            return false;
        }
        if !is_type_included(&file.extension, &scope.config.include_types) {
            return false;
        }
    }

    entry_depth(path, scope.source_folder) <= scope.depth as usize
}

/// Keep the admitted entries, preserving order.
pub fn filter_entries<'e, H, I>(entries: I, scope: &FilterScope<'_>, host: &H) -> Vec<&'e VaultEntry>
where
    H: HostCollaborator + ?Sized,
    I: IntoIterator<Item = &'e VaultEntry>,
{
    entries
        .into_iter()
        .filter(|entry| admits(entry, scope, host))
        .collect()
}

/// Replace folders with their admitted file descendants.
///
/// Only folders strictly above the depth bound are descended into.
pub fn flatten_files<'e, H: HostCollaborator + ?Sized>(
    entries: Vec<&'e VaultEntry>,
    scope: &FilterScope<'_>,
    host: &H,
) -> Vec<&'e VaultEntry> {
    let mut files = Vec::new();

    for entry in entries {
        match entry {
            VaultEntry::File(_) => files.push(entry),
            VaultEntry::Folder(folder) => {
                if entry_depth(&folder.path, scope.source_folder) < scope.depth as usize {
                    let children = filter_entries(&folder.children, scope, host);
                    files.extend(flatten_files(children, scope, host));
                }
            }
        }
    }

    files
}

/// Filter candidates, flattening folders away when they are not admitted.
pub fn select<'e, H, I>(entries: I, scope: &FilterScope<'_>, host: &H) -> Vec<&'e VaultEntry>
where
    H: HostCollaborator + ?Sized,
    I: IntoIterator<Item = &'e VaultEntry>,
{
    let admitted = filter_entries(entries, scope, host);
    if scope.config.includes_folders() {
        admitted
    } else {
        flatten_files(admitted, scope, host)
    }
}

// =============================================================================
// Admission Rules
// =============================================================================

/// Whether a file extension is admitted by the type set.
///
/// An empty set or one containing `all` admits everything.
pub fn is_type_included(extension: &str, include_types: &[IncludeType]) -> bool {
    if include_types.is_empty() || include_types.contains(&IncludeType::All) {
        return true;
    }
    include_types.contains(&FileKind::from_extension(extension).include_type())
}

/// Path segments of `path` beyond those of `source_folder`.
///
/// Everything counts from zero under the root.
pub fn entry_depth(path: &str, source_folder: &str) -> usize {
    let segments = |p: &str| p.split('/').filter(|s| !s.is_empty()).count();
    let base = if is_root(source_folder) {
        0
    } else {
        segments(source_folder)
    };
    segments(path).saturating_sub(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::VaultHost;
    use crate::core::vault::MemoryVault;
    use crate::models::{FolderNoteSettings, GlobalSettings, ManifestFile, ManifestFolder, VaultManifest};

    fn create_test_vault() -> MemoryVault {
        let file = |path: &str| ManifestFile {
            path: path.into(),
            content: String::new(),
            created: 0,
            modified: 0,
        };
        MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                file("note.md"),
                file("A/x.md"),
                file("A/A.md"),
                file("A/Deep/y.md"),
                file("A/Deep/Deeper/z.md"),
                file("B/b.canvas"),
                file("Images/cat.png"),
                file("Sounds/song.mp3"),
                file("overview.md"),
            ],
            folders: vec![ManifestFolder {
                path: "Empty".into(),
                collapsed: false,
            }],
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

    fn config(types: &[IncludeType], depth: u32) -> OverviewConfig {
        OverviewConfig {
            include_types: types.to_vec(),
            depth,
            ..OverviewConfig::default()
        }
    }

    fn paths(entries: &[&VaultEntry]) -> Vec<String> {
        entries.iter().map(|e| e.path().to_string()).collect()
    }

    /// Every admitted entry under `source`, walked recursively.
    fn admitted_tree(vault: &MemoryVault, host: &VaultHost, scope: &FilterScope) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![vault.get_folder(scope.source_folder).unwrap()];
        while let Some(folder) = stack.pop() {
            for entry in filter_entries(&folder.children, scope, host) {
                out.push(entry.path().to_string());
                if let VaultEntry::Folder(sub) = entry {
                    stack.push(sub);
                }
            }
        }
        out.sort();
        out
    }

    // =========================================================================
    // Type Admission Tests
    // =========================================================================

    #[test]
    fn test_type_admission_taxonomy() {
        let cases = [
            ("md", IncludeType::Markdown),
            ("markdown", IncludeType::Markdown),
            ("canvas", IncludeType::Canvas),
            ("pdf", IncludeType::Pdf),
            ("svg", IncludeType::Image),
            ("mov", IncludeType::Video),
            ("flac", IncludeType::Audio),
            ("zip", IncludeType::Other),
        ];
        for (ext, category) in cases {
            assert!(is_type_included(ext, &[category]), "{ext} in {category:?}");
            assert!(is_type_included(ext, &[]), "{ext} with empty set");
            assert!(is_type_included(ext, &[IncludeType::All]), "{ext} with all");
            for other in IncludeType::ALL {
                if other != category && other != IncludeType::All {
                    assert!(!is_type_included(ext, &[other]), "{ext} not in {other:?}");
                }
            }
        }
    }

    #[test]
    fn test_audio_admission_is_symmetric() {
        assert!(is_type_included("mp3", &[IncludeType::Audio]));
        assert!(!is_type_included("mp3", &[IncludeType::Markdown]));
        assert!(!is_type_included("md", &[IncludeType::Audio]));
    }

    // =========================================================================
    // Depth Tests
    // =========================================================================

    #[test]
    fn test_entry_depth() {
        assert_eq!(entry_depth("A", "/"), 1);
        assert_eq!(entry_depth("A/x.md", "/"), 2);
        assert_eq!(entry_depth("A/x.md", "A"), 1);
        assert_eq!(entry_depth("A/Deep/y.md", "A"), 2);
    }

    #[test]
    fn test_flat_root_listing() {
        let vault = MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                ManifestFile { path: "A/x.md".into(), content: String::new(), created: 0, modified: 0 },
                ManifestFile { path: "note.md".into(), content: String::new(), created: 0, modified: 0 },
            ],
            folders: vec![
                ManifestFolder { path: "B".into(), collapsed: false },
            ],
        });
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config(&[IncludeType::Folder, IncludeType::Markdown], 1);
        let blacklist = PathBlacklist::new();
        let scope = FilterScope {
            source_folder: "/",
            depth: 1,
            blacklist: &blacklist,
            config: &config,
            self_path: None,
        };

        let mut admitted = admitted_tree(&vault, &host, &scope);
        admitted.sort();
        assert_eq!(admitted, vec!["A", "B", "note.md"]);
    }

    #[test]
    fn test_depth_monotonicity() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let blacklist = PathBlacklist::new();

        for types in [
            vec![IncludeType::Folder, IncludeType::Markdown],
            vec![IncludeType::Markdown],
            vec![],
        ] {
            let mut previous: Vec<String> = Vec::new();
            for depth in 1..=5 {
                let config = config(&types, depth);
                let scope = FilterScope {
                    source_folder: "/",
                    depth,
                    blacklist: &blacklist,
                    config: &config,
                    self_path: None,
                };
                let mut current = admitted_tree(&vault, &host, &scope);
                let root = vault.get_folder("/").unwrap();
                current.extend(paths(&select(&root.children, &scope, &host)));
                assert!(
                    previous.iter().all(|p| current.contains(p)),
                    "depth {depth} lost entries for {types:?}"
                );
                previous = current;
            }
        }
    }

    // =========================================================================
    // Scope & Blacklist Tests
    // =========================================================================

    #[test]
    fn test_containment_is_segment_aware() {
        let vault = MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                ManifestFile { path: "A/in.md".into(), content: String::new(), created: 0, modified: 0 },
                ManifestFile { path: "AB/out.md".into(), content: String::new(), created: 0, modified: 0 },
            ],
            folders: vec![],
        });
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config(&[], 3);
        let blacklist = PathBlacklist::new();
        let scope = FilterScope {
            source_folder: "A",
            depth: 3,
            blacklist: &blacklist,
            config: &config,
            self_path: None,
        };

        assert!(admits(vault.get_entry("A/in.md").unwrap(), &scope, &host));
        assert!(!admits(vault.get_entry("AB/out.md").unwrap(), &scope, &host));
        assert!(!admits(vault.get_entry("A").unwrap(), &scope, &host));
    }

    #[test]
    fn test_self_reference_excluded() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config(&[], 1);
        let blacklist = PathBlacklist::new();
        let scope = FilterScope {
            source_folder: "/",
            depth: 1,
            blacklist: &blacklist,
            config: &config,
            self_path: Some("overview.md"),
        };

        let root = vault.get_folder("/").unwrap();
        let admitted = paths(&filter_entries(&root.children, &scope, &host));
        assert!(!admitted.contains(&"overview.md".to_string()));
        assert!(admitted.contains(&"note.md".to_string()));
    }

    #[test]
    fn test_excluded_marker() {
        let vault = create_test_vault();
        let settings = GlobalSettings {
            excluded_from_overview: vec!["Images".into()],
            ..settings()
        };
        let host = VaultHost::new(&vault, &settings);
        let config = config(&[], 2);
        let blacklist = PathBlacklist::new();
        let scope = FilterScope {
            source_folder: "/",
            depth: 2,
            blacklist: &blacklist,
            config: &config,
            self_path: None,
        };

        assert!(!admits(vault.get_entry("Images").unwrap(), &scope, &host));
        assert!(!admits(vault.get_entry("Images/cat.png").unwrap(), &scope, &host));
    }

    #[test]
    fn test_blacklist_suppression() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let root = vault.get_folder("/").unwrap();
        let blacklist = collect_folder_notes(root, 3, &host);
        assert!(blacklist.contains("A/A.md"));

        let entry = vault.get_entry("A/A.md").unwrap();
        let hidden = config(&[], 3);
        let scope = FilterScope {
            source_folder: "/",
            depth: 3,
            blacklist: &blacklist,
            config: &hidden,
            self_path: None,
        };
        assert!(!admits(entry, &scope, &host));

        let shown = OverviewConfig {
            show_folder_notes: true,
            ..hidden.clone()
        };
        let scope = FilterScope {
            config: &shown,
            ..scope
        };
        assert!(admits(entry, &scope, &host));
    }

    #[test]
    fn test_collect_folder_notes_respects_depth() {
        let vault = MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                ManifestFile { path: "A/A.md".into(), content: String::new(), created: 0, modified: 0 },
                ManifestFile { path: "A/B/B.md".into(), content: String::new(), created: 0, modified: 0 },
                ManifestFile { path: "A/B/C/C.md".into(), content: String::new(), created: 0, modified: 0 },
            ],
            folders: vec![],
        });
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let source = vault.get_folder("A").unwrap();

        let blacklist = collect_folder_notes(source, 1, &host);
        assert!(blacklist.contains("A/A.md"));
        assert!(blacklist.contains("A/B/B.md"));
        assert!(!blacklist.contains("A/B/C/C.md"));
        assert_eq!(blacklist.len(), 2);
    }

    // =========================================================================
    // Flattening Tests
    // =========================================================================

    #[test]
    fn test_type_exclusion_flattens_folders() {
        let vault = create_test_vault();
        let settings = settings();
        let host = VaultHost::new(&vault, &settings);
        let config = config(&[IncludeType::Markdown], 3);
        let blacklist = PathBlacklist::new();
        let scope = FilterScope {
            source_folder: "Images",
            depth: 3,
            blacklist: &blacklist,
            config: &config,
            self_path: None,
        };

        let images = vault.get_folder("Images").unwrap();
        assert!(select(&images.children, &scope, &host).is_empty());

        let root = vault.get_folder("/").unwrap();
        let scope = FilterScope {
            source_folder: "/",
            ..scope
        };
        let files = paths(&select(&root.children, &scope, &host));
        assert!(files.iter().all(|p| p.ends_with(".md")));
        assert!(!files.contains(&"Images/cat.png".to_string()));
        assert!(files.contains(&"A/Deep/y.md".to_string()));
        // Depth 4 is beyond the bound
        assert!(!files.contains(&"A/Deep/Deeper/z.md".to_string()));
    }
}
