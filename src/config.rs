//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Plugin-level defaults are loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Plugin-level defaults (default overview block, folder-note host settings).
pub const DEFAULT_SETTINGS_TOML: &str = include_str!("../assets/defaults.toml");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "folder-overview";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Overview Blocks
// =============================================================================

/// Language tag of the fenced block that embeds an overview configuration.
pub const CODE_BLOCK_LANG: &str = "folder-overview";

/// Maximum number of lines scanned for a block's closing fence.
pub const MAX_CODE_BLOCK_SEARCH_LINES: usize = 50;

/// Blockquote prefix used by the callout variant.
pub const CALLOUT_PREFIX: &str = "> ";

/// Folder path sentinel: the folder containing the hosting document.
pub const PARENT_FOLDER_SENTINEL: &str = "File’s parent folder path";

/// Folder path sentinel: the folder the hosting document is a folder note for.
pub const LINKED_FOLDER_SENTINEL: &str = "Path of folder linked to the file";

/// Path of the vault root folder.
pub const ROOT_PATH: &str = "/";

/// Folder name shown in titles when the source folder is the vault root.
pub const ROOT_FOLDER_NAME: &str = "Vault";

// =============================================================================
// Link List
// =============================================================================

/// Class of the span marking the start of a mirrored link list.
pub const LINK_LIST_START_CLASS: &str = "fv-link-list-start";

/// Class of the span marking the end of a mirrored link list.
pub const LINK_LIST_END_CLASS: &str = "fv-link-list-end";

/// Class of the span appended to link lines when the link list is hidden.
pub const LINK_LIST_ITEM_CLASS: &str = "fv-link-list-item";

// =============================================================================
// Timing
// =============================================================================

/// Delay between a render and the link-list rewrite it triggers.
pub const LINK_LIST_UPDATE_DELAY_MS: u32 = 1000;

/// Debounce window for re-rendering an overview after vault changes.
pub const RENDER_DEBOUNCE_MS: u32 = 300;

/// Debounce window for rebuilding every indexed link list.
pub const GLOBAL_RESYNC_DEBOUNCE_MS: u32 = 2000;

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u32 = 5000;

// =============================================================================
// Grid Style
// =============================================================================

/// Characters of document body shown in a grid card preview.
pub const PREVIEW_CHARS: usize = 200;

// =============================================================================
// Network Configuration
// =============================================================================

/// Location of the demo vault manifest.
pub const VAULT_MANIFEST_URL: &str = "./vault.json";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// - `Bootstrap` - Bootstrap Icons, filled
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
