//! Document view: markdown runs interleaved with live overview blocks.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::debug;
use wasm_bindgen::JsCast;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::overview::OverviewBlock;
use crate::core::blocks::{DocumentSegment, insert_overview, split_document};
use crate::core::link_list::strip_link_list_markup;
use crate::utils::markdown_to_html;

stylance::import_crate_style!(css, "src/components/document.module.css");

/// Vault path targeted by a clicked in-document link, if any.
fn internal_link(ev: &leptos::ev::MouseEvent) -> Option<String> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let anchor = target.closest("a").ok()??;
    let href = anchor.get_attribute("href")?;
    if href.contains("://") || href.starts_with('#') || href.starts_with("mailto:") {
        return None;
    }
    js_sys::decode_uri_component(&href).ok()?.as_string()
}

#[component]
pub fn DocumentView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let document = Memo::new(move |_| {
        let path = ctx.active.get()?;
        let segments = ctx.vault.with(|vault| vault.read(&path).map(split_document))?;
        Some((path, segments))
    });

    let title = Signal::derive(move || {
        ctx.active.get().map(|path| {
            path.rsplit('/')
                .next()
                .unwrap_or(&path)
                .trim_end_matches(".md")
                .to_string()
        })
    });

    // Segments keyed so unchanged overview blocks stay mounted across edits
    let segments = move || {
        let Some((path, segments)) = document.get() else {
            return Vec::new();
        };
        segments
            .into_iter()
            .enumerate()
            .map(|(idx, segment)| {
                let key = match &segment {
                    DocumentSegment::Markdown(text) => format!("{path}:{idx}:md:{text}"),
                    DocumentSegment::Overview(block) => {
                        format!("{path}:{}:ov:{}", block.start_line, block.body)
                    }
                };
                (key, path.clone(), segment)
            })
            .collect::<Vec<_>>()
    };

    let insert = move |_: leptos::ev::MouseEvent| {
        let Some(path) = ctx.active.get_untracked() else {
            return;
        };
        let defaults = ctx.settings.with_value(|s| s.default_overview.clone());
        ctx.edit_document(&path, |text| {
            let mut text = text.to_string();
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            let cursor = text.split('\n').count() - 1;
            insert_overview(&text, cursor, &defaults)
        });
    };

    let on_link = move |ev: leptos::ev::MouseEvent| {
        let Some(path) = internal_link(&ev) else {
            return;
        };
        if ctx.vault.with_untracked(|v| v.get_file(&path).is_some()) {
            ev.prevent_default();
            debug!(path, "following internal link");
            ctx.open_file(&path);
        }
    };

    view! {
        <Show
            when=move || document.with(Option::is_some)
            fallback=|| view! { <div class=css::empty>"Select a document"</div> }
        >
            <article class=css::document on:click=on_link>
                <header class=css::header>
                    <h1 class=css::title>{move || title.get().unwrap_or_default()}</h1>
                    <button class=css::insert on:click=insert title="Insert folder overview">
                        <Icon icon=ic::PLUS />
                        <span>"Overview"</span>
                    </button>
                </header>
                <For
                    each=segments
                    key=|(key, _, _)| key.clone()
                    children=move |(_, path, segment)| match segment {
                        DocumentSegment::Markdown(text) => {
                            let html = markdown_to_html(&strip_link_list_markup(&text));
                            view! { <div class=css::markdown inner_html=html></div> }.into_any()
                        }
                        DocumentSegment::Overview(block) => {
                            view! { <OverviewBlock document=path block=block /> }.into_any()
                        }
                    }
                />
            </article>
        </Show>
    }
}
