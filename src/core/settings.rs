//! Overview configuration model.
//!
//! Turns the raw YAML of an overview block into a complete
//! [`OverviewConfig`], serializes it back, and applies single-field edits.
//!
//! # Folder path resolution
//!
//! Evaluated in this order:
//! 1. `File’s parent folder path` (or an empty path): the folder containing
//!    the hosting document, the root for documents at the top level.
//! 2. `Path of folder linked to the file`: the folder the document is the
//!    folder note of, falling back to the root.
//! 3. Anything else is a literal folder path and must name an existing
//!    folder; otherwise it stays [`FolderSource::Missing`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::{error, warn};

use crate::config::{DEFAULT_SETTINGS_TOML, LINKED_FOLDER_SENTINEL, PARENT_FOLDER_SENTINEL};
use crate::core::error::OverviewError;
use crate::core::host::HostCollaborator;
use crate::core::vault::{is_root, normalize_path, parent_path};
use crate::models::{
    FolderSource, GlobalSettings, IncludeType, OverviewConfig, OverviewStyle,
    PartialOverviewConfig, SortBy,
};

// =============================================================================
// Plugin Settings
// =============================================================================

/// Parse plugin-level settings from TOML.
pub fn load_settings(source: &str) -> Result<GlobalSettings, OverviewError> {
    Ok(toml::from_str(source)?)
}

/// Bundled plugin defaults, or built-in defaults if they fail to parse.
pub fn default_settings() -> GlobalSettings {
    load_settings(DEFAULT_SETTINGS_TOML).unwrap_or_else(|e| {
        error!(error = %e, "bundled defaults are invalid, using built-in defaults");
        GlobalSettings::default()
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse the YAML body of an overview block.
///
/// Malformed input yields an empty partial configuration. A field with a
/// value of the wrong type is dropped on its own.
pub fn parse_block(source: &str) -> PartialOverviewConfig {
    match serde_yaml::from_str::<Value>(source) {
        Ok(Value::Mapping(map)) => from_mapping(&map),
        Ok(Value::Null) => PartialOverviewConfig::default(),
        Ok(_) => {
            warn!("overview block is not a mapping, using defaults");
            PartialOverviewConfig::default()
        }
        Err(e) => {
            warn!(error = %e, "overview block is not valid YAML, using defaults");
            PartialOverviewConfig::default()
        }
    }
}

fn from_mapping(map: &Mapping) -> PartialOverviewConfig {
    PartialOverviewConfig {
        id: field(map, "id"),
        folder_path: field(map, "folderPath"),
        title: field(map, "title"),
        show_title: field(map, "showTitle"),
        depth: field(map, "depth"),
        include_types: field(map, "includeTypes"),
        style: field(map, "style"),
        disable_file_tag: field(map, "disableFileTag"),
        sort_by: field(map, "sortBy"),
        sort_by_asc: field(map, "sortByAsc"),
        show_empty_folders: field(map, "showEmptyFolders"),
        only_include_subfolders: field(map, "onlyIncludeSubfolders"),
        store_folder_condition: field(map, "storeFolderCondition"),
        show_folder_notes: field(map, "showFolderNotes"),
        disable_collapse_icon: field(map, "disableCollapseIcon"),
        always_collapse: field(map, "alwaysCollapse"),
        auto_sync: field(map, "autoSync"),
        allow_drag_and_drop: field(map, "allowDragAndDrop"),
        hide_link_list: field(map, "hideLinkList"),
        hide_folder_overview: field(map, "hideFolderOverview"),
        use_actual_links: field(map, "useActualLinks"),
        fmtp_integration: field(map, "fmtpIntegration"),
        title_size: field(map, "titleSize"),
        is_in_callout: field(map, "isInCallout"),
        use_wikilinks: field(map, "useWikilinks"),
    }
}

fn field<T: DeserializeOwned>(map: &Mapping, key: &str) -> Option<T> {
    let value = map.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_yaml::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(key, error = %e, "ignoring invalid overview field");
            None
        }
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Merge a partial configuration with defaults.
///
/// # Arguments
/// * `raw` - Fields supplied by the block
/// * `defaults` - Plugin-level default configuration
/// * `context_path` - Path of the document hosting the block
/// * `host` - Used to resolve the source folder
pub fn normalize<H: HostCollaborator + ?Sized>(
    raw: &PartialOverviewConfig,
    defaults: &OverviewConfig,
    context_path: &str,
    host: &H,
) -> OverviewConfig {
    let include_types = match &raw.include_types {
        Some(names) => {
            let mut types: Vec<IncludeType> = Vec::new();
            for t in names.iter().filter_map(|n| IncludeType::parse(n)) {
                if !types.contains(&t) {
                    types.push(t);
                }
            }
            types
        }
        None => defaults.include_types.clone(),
    };

    let folder_path = raw
        .folder_path
        .clone()
        .unwrap_or_else(|| defaults.folder_path.clone());
    let source = resolve_source(&folder_path, context_path, host);

    OverviewConfig {
        id: raw
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_overview_id),
        folder_path,
        title: raw.title.clone().unwrap_or_else(|| defaults.title.clone()),
        show_title: raw.show_title.unwrap_or(defaults.show_title),
        depth: raw.depth.unwrap_or(defaults.depth).max(1),
        include_types,
        style: raw
            .style
            .as_deref()
            .and_then(OverviewStyle::parse)
            .unwrap_or(defaults.style),
        disable_file_tag: raw.disable_file_tag.unwrap_or(defaults.disable_file_tag),
        sort_by: raw
            .sort_by
            .as_deref()
            .and_then(SortBy::parse)
            .unwrap_or(defaults.sort_by),
        sort_by_asc: raw.sort_by_asc.unwrap_or(defaults.sort_by_asc),
        show_empty_folders: raw.show_empty_folders.unwrap_or(defaults.show_empty_folders),
        only_include_subfolders: raw
            .only_include_subfolders
            .unwrap_or(defaults.only_include_subfolders),
        store_folder_condition: raw
            .store_folder_condition
            .unwrap_or(defaults.store_folder_condition),
        show_folder_notes: raw.show_folder_notes.unwrap_or(defaults.show_folder_notes),
        disable_collapse_icon: raw
            .disable_collapse_icon
            .unwrap_or(defaults.disable_collapse_icon),
        always_collapse: raw.always_collapse.unwrap_or(defaults.always_collapse),
        auto_sync: raw.auto_sync.unwrap_or(defaults.auto_sync),
        allow_drag_and_drop: raw.allow_drag_and_drop.unwrap_or(defaults.allow_drag_and_drop),
        hide_link_list: raw.hide_link_list.unwrap_or(defaults.hide_link_list),
        hide_folder_overview: raw
            .hide_folder_overview
            .unwrap_or(defaults.hide_folder_overview),
        use_actual_links: raw.use_actual_links.unwrap_or(defaults.use_actual_links),
        fmtp_integration: raw.fmtp_integration.unwrap_or(defaults.fmtp_integration),
        title_size: raw.title_size.unwrap_or(defaults.title_size).clamp(1, 6),
        is_in_callout: raw.is_in_callout.unwrap_or(defaults.is_in_callout),
        use_wikilinks: raw.use_wikilinks.unwrap_or(defaults.use_wikilinks),
        source,
    }
}

/// Resolve a configured folder path against the hosting document.
pub fn resolve_source<H: HostCollaborator + ?Sized>(
    folder_path: &str,
    context_path: &str,
    host: &H,
) -> FolderSource {
    match folder_path.trim() {
        "" | PARENT_FOLDER_SENTINEL => {
            let parent = parent_path(context_path);
            if is_root(&parent) {
                FolderSource::Root
            } else if host.folder(&parent).is_some() {
                FolderSource::Folder(parent)
            } else {
                FolderSource::Missing(parent)
            }
        }
        LINKED_FOLDER_SENTINEL => match host.linked_folder(context_path) {
            Some(folder) if !folder.is_root() => FolderSource::Folder(folder.path.clone()),
            _ => FolderSource::Root,
        },
        literal => {
            let path = normalize_path(literal);
            if path.is_empty() {
                FolderSource::Root
            } else if host.folder(&path).is_some() {
                FolderSource::Folder(path)
            } else {
                FolderSource::Missing(literal.to_string())
            }
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Serialize a configuration as the YAML body of a block.
///
/// The result always ends with exactly one newline.
pub fn serialize(config: &OverviewConfig) -> Result<String, OverviewError> {
    let yaml = serde_yaml::to_string(config)?;
    let mut body = yaml.trim_end_matches('\n').to_string();
    body.push('\n');
    Ok(body)
}

/// Fresh random identifier in UUID v4 form.
pub fn new_overview_id() -> String {
    static FALLBACK: AtomicU64 = AtomicU64::new(1);

    let mut bytes = [0u8; 16];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        warn!(error = %e, "no randomness available, using a counter id");
        let n = FALLBACK.fetch_add(1, Ordering::Relaxed);
        bytes[8..].copy_from_slice(&n.to_be_bytes());
    }
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

// =============================================================================
// Edits
// =============================================================================

/// A single user edit to an overview configuration.
///
/// The identifier and the callout flag are not editable.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigChange {
    FolderPath(String),
    Title(String),
    ShowTitle(bool),
    Depth(u32),
    IncludeTypes(Vec<IncludeType>),
    Style(OverviewStyle),
    DisableFileTag(bool),
    SortBy(SortBy),
    SortByAsc(bool),
    ShowEmptyFolders(bool),
    OnlyIncludeSubfolders(bool),
    StoreFolderCondition(bool),
    ShowFolderNotes(bool),
    DisableCollapseIcon(bool),
    AlwaysCollapse(bool),
    AutoSync(bool),
    AllowDragAndDrop(bool),
    HideLinkList(bool),
    HideFolderOverview(bool),
    UseActualLinks(bool),
    FmtpIntegration(bool),
    TitleSize(u8),
    UseWikilinks(bool),
}

/// Apply one edit, returning the new configuration.
///
/// A [`ConfigChange::FolderPath`] edit leaves `source` as it was; callers
/// re-resolve it with [`resolve_source`].
pub fn apply_change(config: &OverviewConfig, change: ConfigChange) -> OverviewConfig {
    let mut next = config.clone();
    match change {
        ConfigChange::FolderPath(v) => next.folder_path = v,
        ConfigChange::Title(v) => next.title = v,
        ConfigChange::ShowTitle(v) => next.show_title = v,
        ConfigChange::Depth(v) => next.depth = v.max(1),
        ConfigChange::IncludeTypes(v) => next.include_types = v,
        ConfigChange::Style(v) => next.style = v,
        ConfigChange::DisableFileTag(v) => next.disable_file_tag = v,
        ConfigChange::SortBy(v) => next.sort_by = v,
        ConfigChange::SortByAsc(v) => next.sort_by_asc = v,
        ConfigChange::ShowEmptyFolders(v) => next.show_empty_folders = v,
        ConfigChange::OnlyIncludeSubfolders(v) => next.only_include_subfolders = v,
        ConfigChange::StoreFolderCondition(v) => next.store_folder_condition = v,
        ConfigChange::ShowFolderNotes(v) => next.show_folder_notes = v,
        ConfigChange::DisableCollapseIcon(v) => next.disable_collapse_icon = v,
        ConfigChange::AlwaysCollapse(v) => next.always_collapse = v,
        ConfigChange::AutoSync(v) => next.auto_sync = v,
        ConfigChange::AllowDragAndDrop(v) => next.allow_drag_and_drop = v,
        ConfigChange::HideLinkList(v) => next.hide_link_list = v,
        ConfigChange::HideFolderOverview(v) => next.hide_folder_overview = v,
        ConfigChange::UseActualLinks(v) => next.use_actual_links = v,
        ConfigChange::FmtpIntegration(v) => next.fmtp_integration = v,
        ConfigChange::TitleSize(v) => next.title_size = v.clamp(1, 6),
        ConfigChange::UseWikilinks(v) => next.use_wikilinks = v,
    }
    next
}
