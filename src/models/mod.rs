//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`VaultEntry`], [`FolderNode`], [`FileNode`], [`FileKind`] - Vault tree representation
//! - [`VaultManifest`] - Demo vault loaded at startup
//! - [`OverviewConfig`], [`PartialOverviewConfig`] - Overview block configuration
//! - [`GlobalSettings`] - Plugin-level defaults
//! - [`Notice`], [`EditTarget`] - Transient UI state

mod overview;
mod settings;
mod ui;
mod vault;

pub use overview::{
    FolderSource, IncludeType, OverviewConfig, OverviewStyle, PartialOverviewConfig, SortBy,
};
pub use settings::{FolderNoteSettings, GlobalSettings};
pub use ui::{EditTarget, Notice, NoticeLevel};
pub use vault::{
    FileKind, FileNode, FolderNode, ManifestFile, ManifestFolder, VaultEntry, VaultManifest,
};
