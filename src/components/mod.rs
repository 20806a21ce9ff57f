//! UI components built with Leptos.
//!
//! - [`Shell`] - Main layout (sidebar, document pane, edit panel, notices)
//! - [`sidebar`] - Vault document picker and file actions
//! - [`document`] - Markdown document view with embedded overviews
//! - [`overview`] - Folder overview blocks and their edit panel
//! - [`notice`] - Transient notice stack
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod document;
pub mod icons;
pub mod notice;
pub mod overview;
mod shell;
pub mod sidebar;

pub use shell::Shell;
