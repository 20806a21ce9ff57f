use serde::{Deserialize, Serialize};

use crate::models::IncludeType;

// =============================================================================
// Vault Entries
// =============================================================================

/// A folder in the vault tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FolderNode {
    /// Vault-relative path (`"/"` for the root)
    pub path: String,
    /// Last path segment (empty for the root)
    pub name: String,
    /// Child entries in insertion order
    pub children: Vec<VaultEntry>,
    /// Collapse flag remembered by explorer-style overviews
    pub collapsed: bool,
}

impl FolderNode {
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// A file in the vault tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FileNode {
    /// Vault-relative path, e.g. `Projects/plan.md`
    pub path: String,
    /// File name without extension
    pub basename: String,
    /// Extension without the dot (may be empty)
    pub extension: String,
    /// Creation time as Unix timestamp (milliseconds)
    pub created: u64,
    /// Last modification time as Unix timestamp (milliseconds)
    pub modified: u64,
}

impl FileNode {
    /// Build a file node from its path, splitting basename and extension.
    pub fn new(path: &str, created: u64, modified: u64) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        let (basename, extension) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (name.to_string(), String::new()),
        };
        Self {
            path: path.to_string(),
            basename,
            extension,
            created,
            modified,
        }
    }

    /// File name including the extension.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.extension)
    }

    pub fn is_markdown(&self) -> bool {
        self.extension == "md"
    }
}

/// Either a folder or a file.
#[derive(Clone, Debug, PartialEq)]
pub enum VaultEntry {
    Folder(FolderNode),
    File(FileNode),
}

impl VaultEntry {
    pub fn path(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.path,
            Self::File(file) => &file.path,
        }
    }

    /// Display name: folder name, or file name with extension.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => file.name(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }
}

// =============================================================================
// File Taxonomy
// =============================================================================

/// Fixed extension taxonomy used for type admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Markdown,
    Canvas,
    Pdf,
    Image,
    Video,
    Audio,
    Other,
}

impl FileKind {
    /// Classify a file extension (case-insensitive, without the dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "md" | "markdown" => Self::Markdown,
            "canvas" => Self::Canvas,
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" => Self::Image,
            "mp4" | "webm" | "ogv" | "mov" | "mkv" => Self::Video,
            "mp3" | "wav" | "m4a" | "3gp" | "flac" | "ogg" | "oga" | "opus" => Self::Audio,
            _ => Self::Other,
        }
    }

    /// The admitted-type category matching this kind.
    pub fn include_type(self) -> IncludeType {
        match self {
            Self::Markdown => IncludeType::Markdown,
            Self::Canvas => IncludeType::Canvas,
            Self::Pdf => IncludeType::Pdf,
            Self::Image => IncludeType::Image,
            Self::Video => IncludeType::Video,
            Self::Audio => IncludeType::Audio,
            Self::Other => IncludeType::Other,
        }
    }
}

// =============================================================================
// Manifest Types
// =============================================================================

/// Root manifest structure from vault.json
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VaultManifest {
    /// File entries (parent folders are created implicitly)
    pub files: Vec<ManifestFile>,
    /// Folders that must exist even when empty
    #[serde(default)]
    pub folders: Vec<ManifestFolder>,
}

/// File entry from vault.json
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ManifestFile {
    /// File path relative to the vault root
    pub path: String,
    /// Text content (empty for binary files)
    #[serde(default)]
    pub content: String,
    /// Creation time (Unix timestamp, milliseconds)
    #[serde(default)]
    pub created: u64,
    /// Last modification time (Unix timestamp, milliseconds)
    #[serde(default)]
    pub modified: u64,
}

/// Folder entry from vault.json
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ManifestFolder {
    /// Folder path relative to the vault root
    pub path: String,
    /// Initial collapse flag
    #[serde(default)]
    pub collapsed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // FileNode Tests
    // =========================================================================

    #[test]
    fn test_file_node_splits_name() {
        let file = FileNode::new("Projects/plan.v2.md", 1, 2);
        assert_eq!(file.basename, "plan.v2");
        assert_eq!(file.extension, "md");
        assert_eq!(file.name(), "plan.v2.md");
        assert!(file.is_markdown());
    }

    #[test]
    fn test_file_node_without_extension() {
        let file = FileNode::new("README", 0, 0);
        assert_eq!(file.basename, "README");
        assert_eq!(file.extension, "");

        let dotfile = FileNode::new("notes/.hidden", 0, 0);
        assert_eq!(dotfile.basename, ".hidden");
        assert_eq!(dotfile.extension, "");
    }

    // =========================================================================
    // FileKind Tests
    // =========================================================================

    #[test]
    fn test_file_kind_detection() {
        assert_eq!(FileKind::from_extension("md"), FileKind::Markdown);
        assert_eq!(FileKind::from_extension("markdown"), FileKind::Markdown);
        assert_eq!(FileKind::from_extension("canvas"), FileKind::Canvas);
        assert_eq!(FileKind::from_extension("pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_extension("JPG"), FileKind::Image);
        assert_eq!(FileKind::from_extension("webp"), FileKind::Image);
        assert_eq!(FileKind::from_extension("mkv"), FileKind::Video);
        assert_eq!(FileKind::from_extension("3gp"), FileKind::Audio);
        assert_eq!(FileKind::from_extension("opus"), FileKind::Audio);
        assert_eq!(FileKind::from_extension("xyz"), FileKind::Other);
        assert_eq!(FileKind::from_extension(""), FileKind::Other);
    }

    #[test]
    fn test_manifest_defaults() {
        let manifest: VaultManifest =
            serde_json::from_str(r#"{"files":[{"path":"a.md"}]}"#).unwrap();
        assert_eq!(manifest.files[0].content, "");
        assert_eq!(manifest.files[0].created, 0);
        assert!(manifest.folders.is_empty());
    }
}
