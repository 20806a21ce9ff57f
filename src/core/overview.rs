//! Overview render pipeline entry point.
//!
//! [`prepare`] runs one full pass for an overview instance: it resolves the
//! title, walks the source folder in the configured style and computes the
//! mirrored link list. The result is a plain value; components only draw it.

use tracing::debug;

use crate::core::error::OverviewError;
use crate::core::host::HostCollaborator;
use crate::core::link_list::build_lines;
use crate::core::settings::{normalize, parse_block};
use crate::core::title::{TitleVariables, render_title};
use crate::core::tree::{Card, OverviewNode, TreeBuilder};
use crate::core::vault::MemoryVault;
use crate::core::write_queue::TextEdit;
use crate::models::{FolderSource, OverviewConfig, OverviewStyle};

/// What an overview displays below its title.
#[derive(Clone, Debug, PartialEq)]
pub enum OverviewBody {
    /// The configuration admits no entry type at all
    NoIncludedTypes,
    /// The configured folder does not exist
    FolderMissing(String),
    /// Nothing survived filtering
    Empty,
    List(Vec<OverviewNode>),
    Explorer(Vec<OverviewNode>),
    Grid(Vec<Card>),
}

/// Result of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct OverviewRender {
    pub config: OverviewConfig,
    /// Rendered title, present when `showTitle` is on
    pub title: Option<String>,
    pub body: OverviewBody,
    /// Link lines to mirror into the document, when `useActualLinks` is on
    pub link_list: Option<Vec<String>>,
}

impl OverviewRender {
    /// Edit that brings the document's link list in line with this render.
    pub fn link_list_edit(&self) -> Option<TextEdit> {
        self.link_list.as_ref().map(|lines| TextEdit::LinkList {
            config: self.config.clone(),
            lines: lines.clone(),
        })
    }
}

/// Parse and normalize the body of a block hosted in `document`.
pub fn load_config<H: HostCollaborator + ?Sized>(
    source: &str,
    document: &str,
    host: &H,
) -> OverviewConfig {
    normalize(&parse_block(source), host.default_overview(), document, host)
}

/// Rendered title of an overview, whether shown or not.
pub fn overview_title<H: HostCollaborator + ?Sized>(
    config: &OverviewConfig,
    document: &str,
    host: &H,
) -> String {
    let folder = match &config.source {
        FolderSource::Missing(path) => path.as_str(),
        resolved => resolved.path().unwrap_or_default(),
    };
    let vars = TitleVariables::collect(folder, document, host);
    render_title(&config.title, &vars, host.frontmatter(document).as_ref())
}

/// Run the render pipeline for one overview.
///
/// # Errors
/// [`OverviewError::DocumentNotFound`] if `document` is not in the vault.
pub fn prepare<H: HostCollaborator + ?Sized>(
    config: &OverviewConfig,
    document: &str,
    host: &H,
) -> Result<OverviewRender, OverviewError> {
    if host.file(document).is_none() {
        return Err(OverviewError::DocumentNotFound(document.to_string()));
    }

    let title = config
        .show_title
        .then(|| overview_title(config, document, host));
    let render = |body: OverviewBody, link_list: Option<Vec<String>>| OverviewRender {
        config: config.clone(),
        title: title.clone(),
        body,
        link_list,
    };

    if config.include_types.is_empty() {
        return Ok(render(OverviewBody::NoIncludedTypes, None));
    }

    let source = match config.source.path().and_then(|path| host.folder(path)) {
        Some(folder) => folder,
        None => {
            let path = match &config.source {
                FolderSource::Missing(path) => path.clone(),
                _ => config.folder_path.clone(),
            };
            debug!(id = %config.id, path = %path, "overview source folder missing");
            return Ok(render(OverviewBody::FolderMissing(path), None));
        }
    };

    let builder = TreeBuilder::new(host, config, source, Some(document));
    let list = builder.build_list();
    let link_list = config
        .use_actual_links
        .then(|| build_lines(&list, config));

    let body = if list.is_empty() {
        OverviewBody::Empty
    } else {
        match config.style {
            OverviewStyle::List => OverviewBody::List(list),
            OverviewStyle::Explorer => OverviewBody::Explorer(builder.build_explorer()),
            OverviewStyle::Grid => OverviewBody::Grid(builder.build_cards()),
        }
    };

    Ok(render(body, link_list))
}

/// Children of an explorer folder being expanded.
pub fn expand_folder<H: HostCollaborator + ?Sized>(
    config: &OverviewConfig,
    document: &str,
    path: &str,
    host: &H,
) -> Vec<OverviewNode> {
    let Some(source) = config.source.path().and_then(|p| host.folder(p)) else {
        return Vec::new();
    };
    TreeBuilder::new(host, config, source, Some(document)).expand(path)
}

/// Record an explorer collapse toggle on the folder itself.
///
/// Only persisted with `storeFolderCondition`; returns whether the vault
/// changed.
pub fn persist_collapse(
    vault: &mut MemoryVault,
    config: &OverviewConfig,
    path: &str,
    collapsed: bool,
) -> bool {
    config.store_folder_condition && vault.set_collapsed(path, collapsed)
}
