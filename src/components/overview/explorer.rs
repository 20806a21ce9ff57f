//! Explorer style: a file-browser tree with lazily expanded folders.
//!
//! Expanding a folder materializes only its direct children; collapsing
//! drops the rendered subtree.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::overview::list::{EntryLink, FileTag};
use crate::core::overview::expand_folder;
use crate::core::tree::{FileItem, FolderItem, OverviewNode};
use crate::models::{FileKind, OverviewConfig};

stylance::import_crate_style!(css, "src/components/overview/explorer.module.css");

#[component]
pub fn ExplorerView(
    nodes: Vec<OverviewNode>,
    config: OverviewConfig,
    document: String,
) -> impl IntoView {
    let config = StoredValue::new(config);
    let document = StoredValue::new(document);

    view! {
        <ul class=css::tree role="tree">
            {nodes
                .into_iter()
                .map(|node| explorer_node(node, config, document))
                .collect_view()}
        </ul>
    }
}

fn explorer_node(
    node: OverviewNode,
    config: StoredValue<OverviewConfig>,
    document: StoredValue<String>,
) -> AnyView {
    match node {
        OverviewNode::File(file) => view! { <ExplorerFile file=file /> }.into_any(),
        OverviewNode::Folder(folder) => {
            view! { <ExplorerFolder folder=folder config=config document=document /> }.into_any()
        }
    }
}

#[component]
fn ExplorerFile(file: FileItem) -> impl IntoView {
    let extension = file.path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    let icon = ic::file_icon(FileKind::from_extension(extension));

    view! {
        <li class=css::item role="treeitem">
            <div class=css::row>
                <span class=css::icon><Icon icon=icon /></span>
                <EntryLink path=file.path label=file.display_name />
                <FileTag tag=file.tag />
            </div>
        </li>
    }
}

#[component]
fn ExplorerFolder(
    folder: FolderItem,
    config: StoredValue<OverviewConfig>,
    document: StoredValue<String>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let collapsed = RwSignal::new(folder.collapsed);
    let children = RwSignal::new(folder.children);
    let path = StoredValue::new(folder.path);
    let expandable = folder.expandable;

    let toggle = move |_: leptos::ev::MouseEvent| {
        if !expandable {
            return;
        }
        let collapse = !collapsed.get_untracked();
        if collapse {
            children.set(Vec::new());
        } else {
            let nodes = config.with_value(|config| {
                document.with_value(|doc| {
                    path.with_value(|path| {
                        ctx.with_host(|host| expand_folder(config, doc, path, host))
                    })
                })
            });
            children.set(nodes);
        }
        collapsed.set(collapse);
        config.with_value(|config| {
            path.with_value(|path| ctx.persist_collapse(config, path, collapse))
        });
    };

    let label = match folder.folder_note {
        Some(note) => view! { <EntryLink path=note label=folder.display_name /> }.into_any(),
        None => view! { <span class=css::folderName>{folder.display_name}</span> }.into_any(),
    };

    view! {
        <li
            class=css::item
            role="treeitem"
            aria-expanded=move || (!collapsed.get()).to_string()
        >
            <div class=css::row on:click=toggle>
                <span class=css::chevron>
                    <Show when=move || expandable>
                        {move || {
                            let icon = if collapsed.get() { ic::CHEVRON_RIGHT } else { ic::CHEVRON_DOWN };
                            view! { <Icon icon=icon /> }
                        }}
                    </Show>
                </span>
                <span class=css::icon>
                    {move || {
                        let icon = if collapsed.get() { ic::FOLDER } else { ic::FOLDER_OPEN };
                        view! { <Icon icon=icon /> }
                    }}
                </span>
                {label}
            </div>
            <Show when=move || !collapsed.get()>
                <ul class=css::children role="group">
                    <For
                        each=move || children.get()
                        key=|node| node.path().to_string()
                        children=move |node| explorer_node(node, config, document)
                    />
                </ul>
            </Show>
        </li>
    }
}
