//! Grid style: one card per entry, with content previews for documents.

use std::collections::HashMap;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::overview::list::FileTag;
use crate::core::events::Generation;
use crate::core::tree::{Card, content_preview};
use crate::models::FileKind;
use crate::utils::format::format_date_iso;

stylance::import_crate_style!(css, "src/components/overview/grid.module.css");

#[component]
pub fn GridView(cards: Vec<Card>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let previews = RwSignal::new(HashMap::<String, String>::new());
    let generation = Generation::new();
    let documents: Vec<String> = cards
        .iter()
        .filter(|card| !card.is_folder)
        .map(|card| card.path.clone())
        .collect();

    // Previews load after the cards are on screen; a newer grid discards
    // whatever this one was still loading.
    let loader = generation.clone();
    Effect::new(move |_| {
        let ticket = loader.arm();
        let generation = loader.clone();
        let documents = documents.clone();
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            if !generation.is_current(ticket) {
                debug!("discarding stale grid previews");
                return;
            }
            let loaded = ctx.vault.with_untracked(|vault| {
                documents
                    .iter()
                    .filter_map(|path| vault.read(path).map(|text| (path.clone(), content_preview(text))))
                    .collect::<HashMap<_, _>>()
            });
            previews.set(loaded);
        });
    });
    on_cleanup(move || generation.cancel());

    view! {
        <div class=css::grid>
            {cards
                .into_iter()
                .map(|card| view! { <GridCard card=card previews=previews /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn GridCard(card: Card, previews: RwSignal<HashMap<String, String>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let icon = if card.is_folder {
        ic::FOLDER
    } else {
        let extension = card.path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        ic::file_icon(FileKind::from_extension(extension))
    };
    let modified = card.modified.map(|ms| format_date_iso(ms / 1000));
    let path = card.path.clone();
    let preview = move || previews.with(|p| p.get(&path).cloned());

    let link = card.link.clone();
    let clickable = link.is_some();
    let open = move |_: leptos::ev::MouseEvent| {
        if let Some(link) = &link {
            ctx.open_file(link);
        }
    };

    let class = if clickable {
        format!("{} {}", css::card, css::clickable)
    } else {
        css::card.to_string()
    };

    view! {
        <div class=class on:click=open title=card.path.clone()>
            <div class=css::cardHeader>
                <span class=css::icon><Icon icon=icon /></span>
                <span class=css::cardTitle>{card.title}</span>
                <FileTag tag=card.tag />
            </div>
            {move || preview().map(|text| view! { <p class=css::preview>{text}</p> })}
            {modified.map(|date| view! { <span class=css::date>{date}</span> })}
        </div>
    }
}
