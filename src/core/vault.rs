use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::ROOT_PATH;
use crate::core::error::OverviewError;
use crate::core::events::VaultEvent;
use crate::models::{FileNode, FolderNode, VaultEntry, VaultManifest};

/// In-memory vault backing the demo host.
///
/// Holds the folder tree and the text of every file.
///
/// # Path Convention
///
/// - Root folder: `"/"` (an empty string is accepted as well)
/// - File in root: `"note.md"`
/// - Nested file: `"Projects/plan.md"`
/// - No leading or trailing slashes
#[derive(Clone, Debug)]
pub struct MemoryVault {
    /// Root folder containing all entries
    root: VaultEntry,
    /// File text keyed by path
    contents: HashMap<String, String>,
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::empty()
    }
}

impl MemoryVault {
    /// Create empty vault (fallback when the manifest fails to load).
    pub fn empty() -> Self {
        Self {
            root: VaultEntry::Folder(FolderNode {
                path: ROOT_PATH.to_string(),
                name: String::new(),
                children: Vec::new(),
                collapsed: false,
            }),
            contents: HashMap::new(),
        }
    }

    /// Create vault from manifest.
    ///
    /// Parent folders of every file are created implicitly. Entries that
    /// conflict with an existing path are skipped with a warning.
    pub fn from_manifest(manifest: &VaultManifest) -> Self {
        let mut vault = Self::empty();

        for folder in &manifest.folders {
            let path = normalize_path(&folder.path);
            if path.is_empty() {
                continue;
            }
            match vault.ensure_folder(&path) {
                Ok(node) => node.collapsed = folder.collapsed,
                Err(e) => warn!(path = %folder.path, error = %e, "skipping manifest folder"),
            }
        }

        for file in &manifest.files {
            if let Err(e) = vault.insert_file(&file.path, &file.content, file.created, file.modified)
            {
                warn!(path = %file.path, error = %e, "skipping manifest file");
            }
        }

        debug!(files = vault.contents.len(), "vault loaded");
        vault
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get an entry by path.
    ///
    /// - `"/"` or `""` returns the root folder
    /// - `"Projects"` returns the folder
    /// - `"Projects/plan.md"` returns the file
    pub fn get_entry(&self, path: &str) -> Option<&VaultEntry> {
        let mut current = &self.root;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            let VaultEntry::Folder(folder) = current else {
                return None;
            };
            current = folder.children.iter().find(|c| c.name() == part)?;
        }

        Some(current)
    }

    pub fn get_folder(&self, path: &str) -> Option<&FolderNode> {
        self.get_entry(path).and_then(VaultEntry::as_folder)
    }

    pub fn get_file(&self, path: &str) -> Option<&FileNode> {
        self.get_entry(path).and_then(VaultEntry::as_file)
    }

    /// Text content of a file.
    pub fn read(&self, path: &str) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }

    /// All markdown files, sorted by path.
    pub fn markdown_files(&self) -> Vec<&FileNode> {
        let mut files = Vec::new();
        collect_files(&self.root, &mut files);
        files.retain(|f| f.is_markdown());
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Every folder below the root, sorted by path.
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_folders(&self.root, &mut paths);
        paths.retain(|p| !is_root(p));
        paths.sort();
        paths
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Read-modify-write of a file's text.
    ///
    /// `edit` returns `None` when the text should stay as it is; the file is
    /// only written (and an event produced) when the text actually changes.
    pub fn process<F>(
        &mut self,
        path: &str,
        now: u64,
        edit: F,
    ) -> Result<Option<VaultEvent>, OverviewError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let current = self
            .contents
            .get(path)
            .ok_or_else(|| OverviewError::DocumentNotFound(path.to_string()))?;

        let updated = match edit(current) {
            Some(updated) if updated != *current => updated,
            _ => return Ok(None),
        };

        self.contents.insert(path.to_string(), updated);
        if let Some(VaultEntry::File(file)) = self.get_entry_mut(path) {
            file.modified = now;
        }
        Ok(Some(VaultEvent::Modified {
            path: path.to_string(),
        }))
    }

    /// Create a new file with the given text.
    pub fn create_file(
        &mut self,
        path: &str,
        content: &str,
        now: u64,
    ) -> Result<VaultEvent, OverviewError> {
        let path = normalize_path(path);
        if self.get_entry(&path).is_some() {
            return Err(OverviewError::AlreadyExists(path));
        }
        self.insert_file(&path, content, now, now)?;
        Ok(VaultEvent::Created { path })
    }

    /// Create a folder (and any missing parents).
    pub fn create_folder(&mut self, path: &str) -> Result<VaultEvent, OverviewError> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Err(OverviewError::InvalidPath(path));
        }
        if self.get_entry(&path).is_some() {
            return Err(OverviewError::AlreadyExists(path));
        }
        self.ensure_folder(&path)?;
        Ok(VaultEvent::Created { path })
    }

    /// Move a file or folder, rewriting every descendant path.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<VaultEvent, OverviewError> {
        let from = normalize_path(from);
        let to = normalize_path(to);
        if from.is_empty() || to.is_empty() {
            return Err(OverviewError::InvalidPath(from));
        }
        if self.get_entry(&from).is_none() {
            return Err(OverviewError::EntryNotFound(from));
        }
        if self.get_entry(&to).is_some() {
            return Err(OverviewError::AlreadyExists(to));
        }
        if is_nested_path(&to, &from) {
            return Err(OverviewError::InvalidPath(to));
        }

        // Make sure the destination parent exists before detaching anything
        let parent = parent_path(&to);
        if !is_root(&parent) {
            self.ensure_folder(&parent)?;
        }

        let mut entry = self
            .detach(&from)
            .ok_or_else(|| OverviewError::EntryNotFound(from.clone()))?;
        rebase(&mut entry, &to);

        let moved: Vec<String> = self
            .contents
            .keys()
            .filter(|k| *k == &from || is_nested_path(k, &from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(text) = self.contents.remove(&old) {
                let new = format!("{}{}", to, &old[from.len()..]);
                self.contents.insert(new, text);
            }
        }

        self.children_mut(&parent)
            .ok_or_else(|| OverviewError::InvalidPath(parent.clone()))?
            .push(entry);

        Ok(VaultEvent::Renamed { from, to })
    }

    /// Delete a file or folder with everything beneath it.
    pub fn delete(&mut self, path: &str) -> Result<VaultEvent, OverviewError> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Err(OverviewError::InvalidPath(path));
        }
        self.detach(&path)
            .ok_or_else(|| OverviewError::EntryNotFound(path.clone()))?;
        self.contents
            .retain(|k, _| k != &path && !is_nested_path(k, &path));
        Ok(VaultEvent::Deleted { path })
    }

    /// Persist a folder's collapse flag. Returns `true` when it changed.
    pub fn set_collapsed(&mut self, path: &str, collapsed: bool) -> bool {
        match self.get_entry_mut(path) {
            Some(VaultEntry::Folder(folder)) if folder.collapsed != collapsed => {
                folder.collapsed = collapsed;
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn get_entry_mut(&mut self, path: &str) -> Option<&mut VaultEntry> {
        let mut current = &mut self.root;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            let VaultEntry::Folder(folder) = current else {
                return None;
            };
            current = folder.children.iter_mut().find(|c| c.name() == part)?;
        }

        Some(current)
    }

    fn children_mut(&mut self, folder_path: &str) -> Option<&mut Vec<VaultEntry>> {
        match self.get_entry_mut(folder_path)? {
            VaultEntry::Folder(folder) => Some(&mut folder.children),
            VaultEntry::File(_) => None,
        }
    }

    /// Walk to `path`, creating folders along the way.
    fn ensure_folder(&mut self, path: &str) -> Result<&mut FolderNode, OverviewError> {
        let VaultEntry::Folder(root) = &mut self.root else {
            return Err(OverviewError::InvalidPath(path.to_string()));
        };
        let mut current: &mut FolderNode = root;
        let mut current_path = String::new();

        for part in path.split('/').filter(|s| !s.is_empty()) {
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(part);

            let index = match current.children.iter().position(|c| c.name() == part) {
                Some(index) => index,
                None => {
                    current.children.push(VaultEntry::Folder(FolderNode {
                        path: current_path.clone(),
                        name: part.to_string(),
                        children: Vec::new(),
                        collapsed: false,
                    }));
                    current.children.len() - 1
                }
            };

            current = match &mut current.children[index] {
                VaultEntry::Folder(folder) => folder,
                // A file exists where we expect a folder
                VaultEntry::File(_) => return Err(OverviewError::InvalidPath(current_path)),
            };
        }

        Ok(current)
    }

    fn insert_file(
        &mut self,
        path: &str,
        content: &str,
        created: u64,
        modified: u64,
    ) -> Result<(), OverviewError> {
        let path = normalize_path(path);
        if path.is_empty() || self.get_entry(&path).is_some() {
            return Err(OverviewError::InvalidPath(path));
        }
        let parent = parent_path(&path);
        let folder = self.ensure_folder(if is_root(&parent) { "" } else { &parent })?;
        folder
            .children
            .push(VaultEntry::File(FileNode::new(&path, created, modified)));
        self.contents.insert(path, content.to_string());
        Ok(())
    }

    fn detach(&mut self, path: &str) -> Option<VaultEntry> {
        let parent = parent_path(path);
        let children = self.children_mut(&parent)?;
        let index = children.iter().position(|c| c.path() == path)?;
        Some(children.remove(index))
    }
}

// =============================================================================
// Path Helpers
// =============================================================================

/// Whether a path names the vault root.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == ROOT_PATH
}

/// Folder containing `path`: everything before the last `/`, or `"/"`.
pub fn parent_path(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => ROOT_PATH.to_string(),
    }
}

/// Join a folder path and a child name.
pub fn join_path(folder: &str, name: &str) -> String {
    if is_root(folder) {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Normalize a path by resolving `.` and `..` components.
///
/// Returns a relative path (no leading or trailing slashes); the root
/// becomes an empty string.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/').filter(|s| !s.is_empty()) {
        match part {
            ".." => {
                parts.pop();
            }
            "." => {}
            _ => parts.push(part),
        }
    }

    parts.join("/")
}

/// Whether `path` lies strictly beneath `folder`, segment-wise.
///
/// `A/B` is nested under `A`; `AB` is not. Everything is nested under root.
pub fn is_nested_path(path: &str, folder: &str) -> bool {
    if is_root(folder) {
        return !is_root(path);
    }
    path.len() > folder.len() && path.starts_with(folder) && path.as_bytes()[folder.len()] == b'/'
}

fn collect_files<'a>(entry: &'a VaultEntry, out: &mut Vec<&'a FileNode>) {
    match entry {
        VaultEntry::File(file) => out.push(file),
        VaultEntry::Folder(folder) => {
            for child in &folder.children {
                collect_files(child, out);
            }
        }
    }
}

fn collect_folders(entry: &VaultEntry, out: &mut Vec<String>) {
    if let VaultEntry::Folder(folder) = entry {
        out.push(folder.path.clone());
        for child in &folder.children {
            collect_folders(child, out);
        }
    }
}

/// Move an entry to `new_path`, rewriting descendants.
fn rebase(entry: &mut VaultEntry, new_path: &str) {
    match entry {
        VaultEntry::File(file) => {
            let moved = FileNode::new(new_path, file.created, file.modified);
            *file = moved;
        }
        VaultEntry::Folder(folder) => {
            folder.path = new_path.to_string();
            folder.name = new_path.rsplit('/').next().unwrap_or(new_path).to_string();
            for child in &mut folder.children {
                let child_path = join_path(new_path, child.name());
                rebase(child, &child_path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ManifestFile, ManifestFolder};

    fn file(path: &str, content: &str) -> ManifestFile {
        ManifestFile {
            path: path.to_string(),
            content: content.to_string(),
            created: 1,
            modified: 2,
        }
    }

    fn create_test_vault() -> MemoryVault {
        MemoryVault::from_manifest(&VaultManifest {
            files: vec![
                file("note.md", "# Note"),
                file("A/x.md", "x"),
                file("A/Sub/deep.md", "deep"),
                file("B/image.png", ""),
            ],
            folders: vec![ManifestFolder {
                path: "Empty".to_string(),
                collapsed: true,
            }],
        })
    }

    // =========================================================================
    // Construction & Lookup Tests
    // =========================================================================

    #[test]
    fn test_empty_vault() {
        let vault = MemoryVault::empty();
        let root = vault.get_folder("/").unwrap();
        assert!(root.children.is_empty());
        assert!(root.is_root());
        assert!(vault.get_entry("/").is_some());
        assert!(vault.get_entry("").is_some());
    }

    #[test]
    fn test_from_manifest() {
        let vault = create_test_vault();
        let root = vault.get_folder("/").unwrap();
        let names: Vec<_> = root.children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Empty", "note.md", "A", "B"]);

        let folder = vault.get_folder("A/Sub").unwrap();
        assert_eq!(folder.path, "A/Sub");
        assert_eq!(folder.name, "Sub");
        assert!(vault.get_folder("Empty").unwrap().collapsed);
        assert_eq!(vault.read("A/x.md"), Some("x"));
    }

    #[test]
    fn test_manifest_conflict_skipped() {
        let vault = MemoryVault::from_manifest(&VaultManifest {
            files: vec![file("a.md", ""), file("a.md/inner.md", "")],
            folders: vec![],
        });
        assert!(vault.get_file("a.md").is_some());
        assert!(vault.get_entry("a.md/inner.md").is_none());
    }

    #[test]
    fn test_get_entry_nonexistent() {
        let vault = create_test_vault();
        assert!(vault.get_entry("missing").is_none());
        assert!(vault.get_entry("note.md/child").is_none());
        assert!(vault.get_folder("note.md").is_none());
    }

    #[test]
    fn test_markdown_files() {
        let vault = create_test_vault();
        let paths: Vec<_> = vault.markdown_files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["A/Sub/deep.md", "A/x.md", "note.md"]);
    }

    #[test]
    fn test_folder_paths() {
        let vault = create_test_vault();
        assert_eq!(vault.folder_paths(), vec!["A", "A/Sub", "B", "Empty"]);
    }

    // =========================================================================
    // Mutation Tests
    // =========================================================================

    #[test]
    fn test_process_writes_only_on_change() {
        let mut vault = create_test_vault();

        let unchanged = vault.process("note.md", 10, |_| None).unwrap();
        assert!(unchanged.is_none());
        let same = vault.process("note.md", 10, |t| Some(t.to_string())).unwrap();
        assert!(same.is_none());

        let event = vault
            .process("note.md", 10, |t| Some(format!("{t}\nmore")))
            .unwrap();
        assert_eq!(
            event,
            Some(VaultEvent::Modified {
                path: "note.md".into()
            })
        );
        assert_eq!(vault.read("note.md"), Some("# Note\nmore"));
        assert_eq!(vault.get_file("note.md").unwrap().modified, 10);
    }

    #[test]
    fn test_process_missing_document() {
        let mut vault = create_test_vault();
        assert!(matches!(
            vault.process("nope.md", 0, |_| None),
            Err(OverviewError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_create_file_and_folder() {
        let mut vault = create_test_vault();
        let event = vault.create_file("C/new.md", "hi", 5).unwrap();
        assert_eq!(event, VaultEvent::Created { path: "C/new.md".into() });
        assert_eq!(vault.get_file("C/new.md").unwrap().created, 5);

        assert!(matches!(
            vault.create_file("note.md", "", 0),
            Err(OverviewError::AlreadyExists(_))
        ));

        vault.create_folder("D/E").unwrap();
        assert!(vault.get_folder("D/E").is_some());
    }

    #[test]
    fn test_rename_folder_rewrites_descendants() {
        let mut vault = create_test_vault();
        let event = vault.rename("A", "Archive/A2").unwrap();
        assert_eq!(
            event,
            VaultEvent::Renamed {
                from: "A".into(),
                to: "Archive/A2".into()
            }
        );

        assert!(vault.get_entry("A").is_none());
        let deep = vault.get_file("Archive/A2/Sub/deep.md").unwrap();
        assert_eq!(deep.basename, "deep");
        assert_eq!(vault.read("Archive/A2/Sub/deep.md"), Some("deep"));
        assert_eq!(vault.get_folder("Archive/A2/Sub").unwrap().path, "Archive/A2/Sub");
    }

    #[test]
    fn test_rename_into_itself_rejected() {
        let mut vault = create_test_vault();
        assert!(vault.rename("A", "A/Sub/A").is_err());
        assert!(vault.get_folder("A").is_some());
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut vault = create_test_vault();
        vault.delete("A").unwrap();
        assert!(vault.get_entry("A/x.md").is_none());
        assert!(vault.read("A/Sub/deep.md").is_none());
        assert!(vault.delete("A").is_err());
    }

    #[test]
    fn test_set_collapsed() {
        let mut vault = create_test_vault();
        assert!(vault.set_collapsed("A", true));
        assert!(!vault.set_collapsed("A", true));
        assert!(vault.get_folder("A").unwrap().collapsed);
        assert!(!vault.set_collapsed("note.md", true));
    }

    // =========================================================================
    // Path Helper Tests
    // =========================================================================

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("A/B/c.md"), "A/B");
        assert_eq!(parent_path("c.md"), "/");
        assert_eq!(parent_path(""), "/");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/A//B/"), "A/B");
        assert_eq!(normalize_path("A/./B/../C"), "A/C");
        assert_eq!(normalize_path("/"), "");
    }

    #[test]
    fn test_is_nested_path() {
        assert!(is_nested_path("A/B", "A"));
        assert!(is_nested_path("A/B/c.md", "A"));
        assert!(!is_nested_path("AB", "A"));
        assert!(!is_nested_path("A", "A"));
        assert!(is_nested_path("anything", "/"));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/", "a.md"), "a.md");
        assert_eq!(join_path("A", "a.md"), "A/a.md");
    }
}
