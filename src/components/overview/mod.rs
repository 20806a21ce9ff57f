//! Folder overview components.
//!
//! [`OverviewBlock`] owns one overview instance: it runs the render pipeline,
//! re-renders on vault changes and mirrors the link list. The style views
//! only draw what the pipeline produced.

mod block;
mod editor;
mod explorer;
mod grid;
mod list;

pub use block::OverviewBlock;
pub use editor::EditPanel;
