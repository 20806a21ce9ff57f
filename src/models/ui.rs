//! UI state types shared through the application context.

use crate::models::OverviewConfig;

/// Severity of a transient notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message shown briefly in the notice stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// The overview currently open in the edit panel.
#[derive(Clone, Debug, PartialEq)]
pub struct EditTarget {
    /// Document hosting the block
    pub document: String,
    /// Line the block started on when the panel opened
    pub line_start: Option<usize>,
    pub config: OverviewConfig,
}
