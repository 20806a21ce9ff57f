//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::FileKind;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronDown as ChevronDown, LuChevronRight as ChevronRight, LuFile as File,
        LuFileText as FileText, LuFilm as FileVideo, LuFolder as Folder,
        LuFolderOpen as FolderOpen, LuFolderTree as Explorer, LuImage as FileImage,
        LuLayoutDashboard as FileCanvas, LuLayoutGrid as Grid, LuList as List,
        LuMusic as FileAudio, LuBookOpen as FilePdf, LuPencil as Edit, LuPlus as Plus,
        LuRefreshCw as Sync, LuTrash2 as Delete, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowRepeat as Sync, BsChevronDown as ChevronDown, BsChevronRight as ChevronRight,
        BsDiagram3 as Explorer, BsEasel as FileCanvas, BsFileEarmark as File,
        BsFileEarmarkImage as FileImage, BsFileEarmarkMusic as FileAudio,
        BsFileEarmarkPdf as FilePdf, BsFileEarmarkPlay as FileVideo,
        BsFileEarmarkText as FileText, BsFolder2Open as FolderOpen, BsFolderFill as Folder,
        BsGrid as Grid, BsListUl as List, BsPencil as Edit, BsPlusLg as Plus,
        BsTrash as Delete, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_CANVAS, FileCanvas);
themed_icon!(FILE_PDF, FilePdf);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_AUDIO, FileAudio);
themed_icon!(FILE_VIDEO, FileVideo);
themed_icon!(LIST, List);
themed_icon!(GRID, Grid);
themed_icon!(EXPLORER, Explorer);
themed_icon!(PLUS, Plus);
themed_icon!(EDIT, Edit);
themed_icon!(DELETE, Delete);
themed_icon!(SYNC, Sync);
themed_icon!(CLOSE, Close);

/// Icon for a file, by its kind.
pub fn file_icon(kind: FileKind) -> Icon {
    match kind {
        FileKind::Markdown => FILE_TEXT,
        FileKind::Canvas => FILE_CANVAS,
        FileKind::Pdf => FILE_PDF,
        FileKind::Image => FILE_IMAGE,
        FileKind::Audio => FILE_AUDIO,
        FileKind::Video => FILE_VIDEO,
        FileKind::Other => FILE,
    }
}
