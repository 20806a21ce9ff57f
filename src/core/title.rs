//! Overview title templates.
//!
//! `{{properties.<key>}}` is replaced from the hosting document's front
//! matter first, then `{{variable}}` from a fixed vocabulary. Unknown
//! placeholders render as nothing.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_yaml::Mapping;

use crate::config::ROOT_FOLDER_NAME;
use crate::core::frontmatter::value_to_string;
use crate::core::host::HostCollaborator;
use crate::core::vault::is_root;
use crate::models::FileNode;

static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{properties\.([\w-]+)\}\}").expect("valid regex"));

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Values available to `{{variable}}` placeholders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TitleVariables {
    pub folder_name: String,
    pub folder_path: String,
    pub file_path: String,
    pub file_name: String,
    pub fmtp_file_name: String,
}

impl TitleVariables {
    /// Gather variables for an overview of `source_folder` hosted in `document`.
    pub fn collect<H: HostCollaborator + ?Sized>(
        source_folder: &str,
        document: &str,
        host: &H,
    ) -> Self {
        let folder_name = if is_root(source_folder) {
            ROOT_FOLDER_NAME.to_string()
        } else {
            source_folder
                .rsplit('/')
                .next()
                .unwrap_or(source_folder)
                .to_string()
        };
        let file_name = host
            .file(document)
            .map(|f| f.basename.clone())
            .unwrap_or_else(|| FileNode::new(document, 0, 0).basename);
        let fmtp_file_name = host
            .resolve_title(document)
            .unwrap_or_else(|| file_name.clone());

        Self {
            folder_name,
            folder_path: source_folder.to_string(),
            file_path: document.to_string(),
            file_name,
            fmtp_file_name,
        }
    }

    fn lookup(&self, name: &str) -> &str {
        match name {
            "folderName" => &self.folder_name,
            "folderPath" => &self.folder_path,
            "filePath" => &self.file_path,
            "fileName" => &self.file_name,
            "fmtpFileName" => &self.fmtp_file_name,
            _ => "",
        }
    }
}

/// Render a title template.
pub fn render_title(template: &str, vars: &TitleVariables, properties: Option<&Mapping>) -> String {
    let with_properties = PROPERTY_RE.replace_all(template, |caps: &Captures| {
        properties
            .and_then(|map| map.get(&caps[1]))
            .map(value_to_string)
            .unwrap_or_default()
    });

    VARIABLE_RE
        .replace_all(&with_properties, |caps: &Captures| vars.lookup(&caps[1]).to_string())
        .into_owned()
}
