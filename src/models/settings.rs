use serde::Deserialize;

use crate::models::OverviewConfig;

/// Plugin-level settings shared by every overview.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Fallback for every field an overview block omits
    pub default_overview: OverviewConfig,
    /// Rebuild every indexed link list after vault mutations
    pub auto_update_links: bool,
    /// Folder-note host integration
    pub folder_notes: FolderNoteSettings,
    /// Paths (folders or files) hidden from every overview
    pub excluded_from_overview: Vec<String>,
}

/// How folder notes ("representative notes") are located.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderNoteSettings {
    pub enabled: bool,
    /// Note basename; `{{folder_name}}` is replaced by the folder's name
    pub name_template: String,
    /// Front-matter key holding a display title
    pub title_property: Option<String>,
}

impl Default for FolderNoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            name_template: "{{folder_name}}".to_string(),
            title_property: None,
        }
    }
}

impl FolderNoteSettings {
    /// Basename of the note representing a folder called `folder_name`.
    pub fn note_basename(&self, folder_name: &str) -> String {
        self.name_template.replace("{{folder_name}}", folder_name)
    }
}
