//! Overview configuration types.
//!
//! [`OverviewConfig`] is the complete, normalized configuration of one overview
//! instance. It serializes to the YAML body of a `folder-overview` block with
//! camelCase keys. [`PartialOverviewConfig`] is what a block actually supplies
//! before defaults are applied.

use serde::{Deserialize, Serialize};

use crate::config::ROOT_PATH;

// =============================================================================
// Enumerations
// =============================================================================

/// Entry categories an overview may admit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeType {
    Folder,
    Markdown,
    Canvas,
    Pdf,
    Image,
    Audio,
    Video,
    Other,
    All,
}

impl IncludeType {
    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "folder" => Some(Self::Folder),
            "markdown" => Some(Self::Markdown),
            "canvas" => Some(Self::Canvas),
            "pdf" => Some(Self::Pdf),
            "image" => Some(Self::Image),
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "other" => Some(Self::Other),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::Markdown => "Markdown",
            Self::Canvas => "Canvas",
            Self::Pdf => "PDF",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Other => "Other",
            Self::All => "All",
        }
    }

    /// Every category, in the order the edit panel lists them.
    pub const ALL: [IncludeType; 9] = [
        Self::Folder,
        Self::Markdown,
        Self::Canvas,
        Self::Pdf,
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Other,
        Self::All,
    ];
}

/// Render style of an overview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewStyle {
    #[default]
    List,
    Explorer,
    Grid,
}

impl OverviewStyle {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "list" => Some(Self::List),
            "explorer" => Some(Self::Explorer),
            "grid" => Some(Self::Grid),
            _ => None,
        }
    }
}

/// Sort key applied to files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Created,
    Modified,
}

impl SortBy {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "created" => Some(Self::Created),
            "modified" => Some(Self::Modified),
            _ => None,
        }
    }
}

/// Where the overview's source folder resolved to.
///
/// Computed during normalization and never serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FolderSource {
    /// The vault root
    #[default]
    Root,
    /// An existing folder
    Folder(String),
    /// A literal path that names no folder
    Missing(String),
}

impl FolderSource {
    /// Path of the resolved folder, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Root => Some(ROOT_PATH),
            Self::Folder(path) => Some(path),
            Self::Missing(_) => None,
        }
    }
}

// =============================================================================
// OverviewConfig
// =============================================================================

/// Complete configuration of one overview instance.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewConfig {
    pub id: String,
    pub folder_path: String,
    pub title: String,
    pub show_title: bool,
    pub depth: u32,
    pub include_types: Vec<IncludeType>,
    pub style: OverviewStyle,
    pub disable_file_tag: bool,
    pub sort_by: SortBy,
    pub sort_by_asc: bool,
    pub show_empty_folders: bool,
    pub only_include_subfolders: bool,
    pub store_folder_condition: bool,
    pub show_folder_notes: bool,
    pub disable_collapse_icon: bool,
    pub always_collapse: bool,
    pub auto_sync: bool,
    pub allow_drag_and_drop: bool,
    pub hide_link_list: bool,
    pub hide_folder_overview: bool,
    pub use_actual_links: bool,
    pub fmtp_integration: bool,
    pub title_size: u8,
    pub is_in_callout: bool,
    pub use_wikilinks: bool,
    /// Resolved source folder
    #[serde(skip)]
    pub source: FolderSource,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            folder_path: String::new(),
            title: "{{folderName}} overview".to_string(),
            show_title: false,
            depth: 3,
            include_types: vec![IncludeType::Folder, IncludeType::Markdown],
            style: OverviewStyle::List,
            disable_file_tag: false,
            sort_by: SortBy::Name,
            sort_by_asc: true,
            show_empty_folders: false,
            only_include_subfolders: false,
            store_folder_condition: true,
            show_folder_notes: false,
            disable_collapse_icon: true,
            always_collapse: false,
            auto_sync: true,
            allow_drag_and_drop: true,
            hide_link_list: true,
            hide_folder_overview: false,
            use_actual_links: false,
            fmtp_integration: false,
            title_size: 1,
            is_in_callout: false,
            use_wikilinks: true,
            source: FolderSource::Root,
        }
    }
}

impl OverviewConfig {
    /// Whether folders appear as entries (otherwise they are flattened away).
    pub fn includes_folders(&self) -> bool {
        self.include_types.is_empty()
            || self
                .include_types
                .iter()
                .any(|t| matches!(t, IncludeType::Folder | IncludeType::All))
    }

    /// Title heading level clamped to `1..=6`.
    pub fn heading_level(&self) -> u8 {
        self.title_size.clamp(1, 6)
    }
}

// =============================================================================
// PartialOverviewConfig
// =============================================================================

/// Configuration fields as supplied by a block; `None` means "use default".
///
/// Enumerated fields stay as raw strings until normalization so an unknown
/// value only loses that one field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialOverviewConfig {
    pub id: Option<String>,
    pub folder_path: Option<String>,
    pub title: Option<String>,
    pub show_title: Option<bool>,
    pub depth: Option<u32>,
    pub include_types: Option<Vec<String>>,
    pub style: Option<String>,
    pub disable_file_tag: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_by_asc: Option<bool>,
    pub show_empty_folders: Option<bool>,
    pub only_include_subfolders: Option<bool>,
    pub store_folder_condition: Option<bool>,
    pub show_folder_notes: Option<bool>,
    pub disable_collapse_icon: Option<bool>,
    pub always_collapse: Option<bool>,
    pub auto_sync: Option<bool>,
    pub allow_drag_and_drop: Option<bool>,
    pub hide_link_list: Option<bool>,
    pub hide_folder_overview: Option<bool>,
    pub use_actual_links: Option<bool>,
    pub fmtp_integration: Option<bool>,
    pub title_size: Option<u8>,
    pub is_in_callout: Option<bool>,
    pub use_wikilinks: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_type_parse() {
        assert_eq!(IncludeType::parse("Markdown"), Some(IncludeType::Markdown));
        assert_eq!(IncludeType::parse(" ALL "), Some(IncludeType::All));
        assert_eq!(IncludeType::parse("spreadsheet"), None);
    }

    #[test]
    fn test_includes_folders() {
        let mut config = OverviewConfig::default();
        assert!(config.includes_folders());

        config.include_types = vec![IncludeType::Markdown];
        assert!(!config.includes_folders());

        config.include_types = vec![IncludeType::All];
        assert!(config.includes_folders());

        config.include_types.clear();
        assert!(config.includes_folders());
    }

    #[test]
    fn test_heading_level_clamped() {
        let mut config = OverviewConfig::default();
        config.title_size = 0;
        assert_eq!(config.heading_level(), 1);
        config.title_size = 9;
        assert_eq!(config.heading_level(), 6);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let yaml = serde_yaml::to_string(&OverviewConfig::default()).unwrap();
        assert!(yaml.contains("folderPath:"));
        assert!(yaml.contains("sortByAsc: true"));
        assert!(yaml.contains("includeTypes:\n- folder\n- markdown"));
        assert!(!yaml.contains("source"));
    }
}
