//! One live overview instance.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::{debug, error};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::overview::explorer::ExplorerView;
use crate::components::overview::grid::GridView;
use crate::components::overview::list::ListView;
use crate::config::{LINK_LIST_UPDATE_DELAY_MS, RENDER_DEBOUNCE_MS};
use crate::core::blocks::LocatedBlock;
use crate::core::events::Debouncer;
use crate::core::settings::normalize;
use crate::core::{HostCollaborator, OverviewBody, OverviewRender, prepare};
use crate::models::{EditTarget, NoticeLevel};

stylance::import_crate_style!(css, "src/components/overview/block.module.css");

/// Heading for the overview title at `level` (1-6).
fn title_view(level: u8, text: String) -> AnyView {
    match level {
        1 => view! { <h1 class=css::title>{text}</h1> }.into_any(),
        2 => view! { <h2 class=css::title>{text}</h2> }.into_any(),
        3 => view! { <h3 class=css::title>{text}</h3> }.into_any(),
        4 => view! { <h4 class=css::title>{text}</h4> }.into_any(),
        5 => view! { <h5 class=css::title>{text}</h5> }.into_any(),
        _ => view! { <h6 class=css::title>{text}</h6> }.into_any(),
    }
}

#[component]
pub fn OverviewBlock(document: String, block: LocatedBlock) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let config = ctx.with_host(|host| {
        normalize(&block.config, host.default_overview(), &document, host)
    });
    let line_start = block.start_line;

    let config = StoredValue::new(config);
    let document = StoredValue::new(document);
    let render = RwSignal::new(None::<OverviewRender>);
    let renders = StoredValue::new(Debouncer::new(RENDER_DEBOUNCE_MS));
    let link_writes = StoredValue::new(Debouncer::new(LINK_LIST_UPDATE_DELAY_MS));

    let refresh = move || {
        let result = config.with_value(|config| {
            document.with_value(|doc| ctx.with_host(|host| prepare(config, doc, host)))
        });

        let next = match result {
            Ok(next) => next,
            Err(e) => {
                error!(error = %e, "failed to render folder overview");
                ctx.notify(
                    NoticeLevel::Error,
                    "Error creating folder overview - check the console for details",
                );
                return;
            }
        };

        if let OverviewBody::FolderMissing(path) = &next.body {
            let already_reported = render.with_untracked(|r| {
                r.as_ref()
                    .is_some_and(|r| matches!(r.body, OverviewBody::FolderMissing(_)))
            });
            if !already_reported {
                ctx.notify(NoticeLevel::Info, format!("Folder overview: folder not found: {path}"));
            }
        }

        if let Some(edit) = next.link_list_edit() {
            let path = document.get_value();
            let run = link_writes.with_value(|d| {
                d.schedule(TimeoutFuture::new, move || ctx.write(&path, edit))
            });
            spawn_local(async move {
                run.await;
            });
        }

        render.set(Some(next));
    };

    Effect::new(move |_| refresh());

    // Re-render after vault changes beneath the source folder
    let subscription = config.with_value(|c| c.auto_sync).then(|| {
        let folder = config.with_value(|c| c.source.path().map(str::to_string));
        ctx.subscribe(move |event| {
            if !event.is_structural() {
                return;
            }
            if let Some(folder) = &folder
                && !event.touches(folder)
            {
                return;
            }
            debug!(?event, "scheduling overview re-render");
            let run = renders.with_value(|d| d.schedule(TimeoutFuture::new, refresh));
            spawn_local(async move {
                run.await;
            });
        })
    });

    on_cleanup(move || {
        if let Some(subscription) = subscription {
            ctx.unsubscribe(subscription);
        }
        renders.with_value(Debouncer::cancel);
        link_writes.with_value(Debouncer::cancel);
    });

    let open_editor = move |_: leptos::ev::MouseEvent| {
        ctx.editing.set(Some(EditTarget {
            document: document.get_value(),
            line_start: Some(line_start),
            config: config.get_value(),
        }));
    };

    let hidden = config.with_value(|c| c.hide_folder_overview);

    let body = move || {
        let Some(render) = render.get() else {
            return ().into_any();
        };
        let OverviewRender {
            config, title, body, ..
        } = render;
        let doc = document.get_value();

        let title = title.map(|text| title_view(config.heading_level(), text));
        let content = match body {
            OverviewBody::NoIncludedTypes => {
                view! { <p class=css::message>"No file types are included in this overview."</p> }
                    .into_any()
            }
            OverviewBody::FolderMissing(path) => {
                view! { <p class=css::message>{format!("Folder not found: {path}")}</p> }
                    .into_any()
            }
            OverviewBody::Empty => ().into_any(),
            OverviewBody::List(nodes) => view! { <ListView nodes=nodes /> }.into_any(),
            OverviewBody::Explorer(nodes) => {
                view! { <ExplorerView nodes=nodes config=config document=doc /> }.into_any()
            }
            OverviewBody::Grid(cards) => view! { <GridView cards=cards /> }.into_any(),
        };

        view! {
            {title}
            {content}
        }
        .into_any()
    };

    view! {
        <section class=css::overview data-overview-id=config.with_value(|c| c.id.clone())>
            <div class=css::toolbar>
                <button
                    class=css::toolButton
                    on:click=move |_| refresh()
                    title="Refresh overview"
                >
                    <Icon icon=ic::SYNC />
                </button>
                <button class=css::toolButton on:click=open_editor title="Edit overview">
                    <Icon icon=ic::EDIT />
                </button>
            </div>
            <Show when=move || !hidden>
                {body}
            </Show>
        </section>
    }
}
