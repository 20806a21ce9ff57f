//! Utility modules for web, DOM, logging and formatting.
//!
//! Provides:
//! - [`load_manifest`] - Manifest fetching with timeout
//! - [`markdown_to_html`] - Markdown rendering with XSS sanitization
//! - [`log`] - `tracing` output routed to the browser console

pub mod dom;
mod fetch;
pub mod format;
pub mod log;
mod markdown;

pub use fetch::load_manifest;
pub use markdown::markdown_to_html;
