//! List style: a nested bullet list mirroring folder nesting.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::tree::{FileItem, FolderItem, OverviewNode};
use crate::utils::format::format_tag;

stylance::import_crate_style!(css, "src/components/overview/list.module.css");

/// Link to a vault file, opened in place.
#[component]
pub(super) fn EntryLink(path: String, label: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let target = path.clone();
    let open = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        ctx.open_file(&target);
    };

    view! {
        <a class=css::link href=path on:click=open>
            {label}
        </a>
    }
}

/// Extension badge shown next to non-markdown files.
#[component]
pub(super) fn FileTag(tag: Option<String>) -> impl IntoView {
    tag.map(|tag| view! { <span class=css::tag>{format_tag(&tag)}</span> })
}

#[component]
pub fn ListView(nodes: Vec<OverviewNode>) -> impl IntoView {
    view! {
        <ul class=css::list>
            {nodes.into_iter().map(node_view).collect_view()}
        </ul>
    }
}

fn node_view(node: OverviewNode) -> AnyView {
    match node {
        OverviewNode::File(file) => view! { <FileEntry file=file /> }.into_any(),
        OverviewNode::Folder(folder) => view! { <FolderEntry folder=folder /> }.into_any(),
    }
}

#[component]
fn FileEntry(file: FileItem) -> impl IntoView {
    view! {
        <li class=css::file>
            <EntryLink path=file.path label=file.display_name />
            <FileTag tag=file.tag />
        </li>
    }
}

#[component]
fn FolderEntry(folder: FolderItem) -> impl IntoView {
    let expanded = RwSignal::new(true);
    let children = StoredValue::new(folder.children);
    let has_children = children.with_value(|c| !c.is_empty());

    let toggle = move |_: leptos::ev::MouseEvent| expanded.update(|e| *e = !*e);

    let label = match folder.folder_note {
        Some(note) => view! { <EntryLink path=note label=folder.display_name /> }.into_any(),
        None => view! { <span class=css::folderName on:click=toggle>{folder.display_name}</span> }
            .into_any(),
    };

    view! {
        <li class=css::folder>
            <span class=css::folderRow>
                <Show when=move || has_children>
                    <span class=css::chevron on:click=toggle>
                        {move || {
                            let icon = if expanded.get() { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT };
                            view! { <Icon icon=icon /> }
                        }}
                    </span>
                </Show>
                {label}
            </span>
            <Show when=move || has_children && expanded.get()>
                <ul class=css::list>
                    {move || children.get_value().into_iter().map(node_view).collect_view()}
                </ul>
            </Show>
        </li>
    }
}
