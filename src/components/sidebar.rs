//! Vault document picker.
//!
//! Lists every markdown document, marks the ones hosting an overview, and
//! offers the file actions that drive vault events (create, rename, delete).

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_NAME, APP_VERSION};
use crate::core::blocks::has_overview_block;
use crate::core::vault::{join_path, parent_path};
use crate::utils::dom::{now_millis, window};

stylance::import_crate_style!(css, "src/components/sidebar.module.css");

#[derive(Clone, Debug, PartialEq)]
struct DocumentLink {
    path: String,
    has_overview: bool,
}

fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let documents = Signal::derive(move || {
        ctx.vault.with(|vault| {
            vault
                .markdown_files()
                .into_iter()
                .map(|file| DocumentLink {
                    path: file.path.clone(),
                    has_overview: vault.read(&file.path).is_some_and(has_overview_block),
                })
                .collect::<Vec<_>>()
        })
    });

    let has_active = Signal::derive(move || ctx.active.with(Option::is_some));

    let new_note = move |_: leptos::ev::MouseEvent| {
        let folder = ctx
            .active
            .get_untracked()
            .map(|path| parent_path(&path))
            .unwrap_or_default();
        let suggestion = join_path(&folder, "Untitled.md");
        if let Some(path) = prompt("New note path", &suggestion) {
            ctx.mutate(|vault| vault.create_file(&path, "", now_millis()));
            if ctx.vault.with_untracked(|v| v.get_file(&path).is_some()) {
                ctx.open(&path);
            }
        }
    };

    let new_folder = move |_: leptos::ev::MouseEvent| {
        let folder = ctx
            .active
            .get_untracked()
            .map(|path| parent_path(&path))
            .unwrap_or_default();
        if let Some(path) = prompt("New folder path", &join_path(&folder, "New folder")) {
            ctx.mutate(|vault| vault.create_folder(&path));
        }
    };

    let rename = move |_: leptos::ev::MouseEvent| {
        let Some(from) = ctx.active.get_untracked() else {
            return;
        };
        if let Some(to) = prompt("Move or rename to", &from) {
            ctx.mutate(|vault| vault.rename(&from, &to));
        }
    };

    let delete = move |_: leptos::ev::MouseEvent| {
        let Some(path) = ctx.active.get_untracked() else {
            return;
        };
        if confirm(&format!("Delete {path}?")) {
            ctx.mutate(|vault| vault.delete(&path));
        }
    };

    view! {
        <nav class=css::sidebar aria-label="Vault">
            <header class=css::header>
                <span class=css::appName>{APP_NAME}</span>
                <span class=css::version>{format!("v{APP_VERSION}")}</span>
            </header>

            <div class=css::actions>
                <button class=css::action on:click=new_note title="New note">
                    <Icon icon=ic::PLUS />
                </button>
                <button class=css::action on:click=new_folder title="New folder">
                    <Icon icon=ic::FOLDER />
                </button>
                <button
                    class=css::action
                    on:click=rename
                    disabled=move || !has_active.get()
                    title="Move or rename"
                >
                    <Icon icon=ic::EDIT />
                </button>
                <button
                    class=css::action
                    on:click=delete
                    disabled=move || !has_active.get()
                    title="Delete"
                >
                    <Icon icon=ic::DELETE />
                </button>
            </div>

            <ul class=css::list>
                <For
                    each=move || documents.get()
                    key=|doc| (doc.path.clone(), doc.has_overview)
                    children=move |doc| view! { <DocumentItem doc=doc /> }
                />
            </ul>
        </nav>
    }
}

#[component]
fn DocumentItem(doc: DocumentLink) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let path = doc.path.clone();
    let is_active = Signal::derive(move || ctx.active.with(|a| a.as_deref() == Some(path.as_str())));

    let item_class = move || {
        if is_active.get() {
            format!("{} {}", css::item, css::active)
        } else {
            css::item.to_string()
        }
    };

    let label = doc.path.trim_end_matches(".md").to_string();
    let icon = if doc.has_overview {
        ic::EXPLORER
    } else {
        ic::FILE_TEXT
    };
    let path = doc.path.clone();

    view! {
        <li class=item_class on:click=move |_| ctx.open(&path) title=doc.path.clone()>
            <span class=css::icon>
                <Icon icon=icon />
            </span>
            <span class=css::label>{label}</span>
        </li>
    }
}
