//! "Edit overview" panel.
//!
//! Every change is applied to the open configuration and written straight
//! back into the hosting document's block. Turning `useActualLinks` on adds
//! the link-list markers; turning it off removes the mirrored list.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::debug;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{LINKED_FOLDER_SENTINEL, PARENT_FOLDER_SENTINEL};
use crate::core::settings::{ConfigChange, apply_change, resolve_source};
use crate::core::write_queue::TextEdit;
use crate::models::{EditTarget, IncludeType, OverviewConfig, OverviewStyle, SortBy};

stylance::import_crate_style!(css, "src/components/overview/editor.module.css");

/// Apply one change to the open overview and persist it.
fn commit(ctx: AppContext, change: ConfigChange) {
    let Some(target) = ctx.editing.get_untracked() else {
        return;
    };
    let previous = &target.config;

    let mut next = apply_change(previous, change.clone());
    if let ConfigChange::FolderPath(path) = &change {
        next.source = ctx.with_host(|host| resolve_source(path, &target.document, host));
    }
    if next == *previous {
        return;
    }
    debug!(?change, id = next.id, "overview configuration changed");

    let links_added = next.use_actual_links && !previous.use_actual_links;
    if previous.use_actual_links && !next.use_actual_links {
        ctx.enqueue(
            &target.document,
            TextEdit::RemoveLinkList {
                config: previous.clone(),
            },
        );
    }
    ctx.enqueue(
        &target.document,
        TextEdit::ConfigBlock {
            config: next.clone(),
            add_link_list: links_added,
            line_start: target.line_start,
        },
    );
    ctx.flush_writes(&target.document);

    ctx.editing.set(Some(EditTarget {
        config: next,
        ..target
    }));
}

#[component]
fn Toggle(label: &'static str, checked: Signal<bool>, on_change: Callback<bool>) -> impl IntoView {
    view! {
        <label class=css::toggle>
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

#[component]
pub fn EditPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let draft = Signal::derive(move || {
        ctx.editing
            .with(|target| target.as_ref().map(|t| t.config.clone()))
            .unwrap_or_default()
    });

    let folder_options = Signal::derive(move || {
        let mut options = vec![
            PARENT_FOLDER_SENTINEL.to_string(),
            LINKED_FOLDER_SENTINEL.to_string(),
            "/".to_string(),
        ];
        options.extend(ctx.vault.with(|vault| vault.folder_paths()));
        options
    });

    let toggle = move |label: &'static str,
                       get: fn(&OverviewConfig) -> bool,
                       change: fn(bool) -> ConfigChange| {
        view! {
            <Toggle
                label=label
                checked=Signal::derive(move || draft.with(get))
                on_change=Callback::new(move |value| commit(ctx, change(value)))
            />
        }
    };

    let include_types = IncludeType::ALL
        .into_iter()
        .map(|kind| {
            let checked = Signal::derive(move || draft.with(|c| c.include_types.contains(&kind)));
            let on_change = Callback::new(move |on: bool| {
                let mut types = draft.get_untracked().include_types;
                types.retain(|t| *t != kind);
                if on {
                    types.push(kind);
                }
                commit(ctx, ConfigChange::IncludeTypes(types));
            });
            view! { <Toggle label=kind.label() checked=checked on_change=on_change /> }
        })
        .collect_view();

    let close = move |_: leptos::ev::MouseEvent| ctx.editing.set(None);

    view! {
        <aside class=css::panel aria-label="Edit overview">
            <header class=css::header>
                <h2 class=css::heading>"Edit overview"</h2>
                <button class=css::close on:click=close title="Close">
                    <Icon icon=ic::CLOSE />
                </button>
            </header>

            <section class=css::section>
                <label class=css::field>
                    <span>"Folder path"</span>
                    <input
                        type="text"
                        list="fv-folder-options"
                        prop:value=move || draft.with(|c| c.folder_path.clone())
                        on:change=move |ev| commit(ctx, ConfigChange::FolderPath(event_target_value(&ev)))
                    />
                    <datalist id="fv-folder-options">
                        <For
                            each=move || folder_options.get()
                            key=|path| path.clone()
                            children=|path| view! { <option value=path></option> }
                        />
                    </datalist>
                </label>
                <p class=css::hint>
                    {move || draft.with(|c| match c.source.path() {
                        Some(path) => format!("Showing {path}"),
                        None => "Folder not found".to_string(),
                    })}
                </p>
            </section>

            <section class=css::section>
                {toggle("Show title", |c| c.show_title, ConfigChange::ShowTitle)}
                <label class=css::field>
                    <span>"Title"</span>
                    <input
                        type="text"
                        prop:value=move || draft.with(|c| c.title.clone())
                        on:change=move |ev| commit(ctx, ConfigChange::Title(event_target_value(&ev)))
                    />
                </label>
                <label class=css::field>
                    <span>"Title size"</span>
                    <select
                        prop:value=move || draft.with(|c| c.heading_level().to_string())
                        on:change=move |ev| {
                            if let Ok(size) = event_target_value(&ev).parse() {
                                commit(ctx, ConfigChange::TitleSize(size));
                            }
                        }
                    >
                        {(1..=6u8)
                            .map(|n| view! { <option value=n.to_string()>{format!("H{n}")}</option> })
                            .collect_view()}
                    </select>
                </label>
            </section>

            <section class=css::section>
                <label class=css::field>
                    <span>"Style"</span>
                    <select
                        prop:value=move || draft.with(|c| style_name(c.style).to_string())
                        on:change=move |ev| {
                            if let Some(style) = OverviewStyle::parse(&event_target_value(&ev)) {
                                commit(ctx, ConfigChange::Style(style));
                            }
                        }
                    >
                        <option value="list">"List"</option>
                        <option value="explorer">"Explorer"</option>
                        <option value="grid">"Grid"</option>
                    </select>
                </label>
                <label class=css::field>
                    <span>"Depth"</span>
                    <input
                        type="number"
                        min="1"
                        prop:value=move || draft.with(|c| c.depth.to_string())
                        on:change=move |ev| {
                            if let Ok(depth) = event_target_value(&ev).parse() {
                                commit(ctx, ConfigChange::Depth(depth));
                            }
                        }
                    />
                </label>
                <label class=css::field>
                    <span>"Sort by"</span>
                    <select
                        prop:value=move || draft.with(|c| sort_name(c.sort_by).to_string())
                        on:change=move |ev| {
                            if let Some(sort) = SortBy::parse(&event_target_value(&ev)) {
                                commit(ctx, ConfigChange::SortBy(sort));
                            }
                        }
                    >
                        <option value="name">"Name"</option>
                        <option value="created">"Created"</option>
                        <option value="modified">"Modified"</option>
                    </select>
                </label>
                {toggle("Ascending", |c| c.sort_by_asc, ConfigChange::SortByAsc)}
            </section>

            <section class=css::section>
                <h3 class=css::subheading>"Include types"</h3>
                <div class=css::types>{include_types}</div>
            </section>

            <section class=css::section>
                {toggle("Disable file tag", |c| c.disable_file_tag, ConfigChange::DisableFileTag)}
                {toggle("Show empty folders", |c| c.show_empty_folders, ConfigChange::ShowEmptyFolders)}
                {toggle(
                    "Only show first empty subfolders",
                    |c| c.only_include_subfolders,
                    ConfigChange::OnlyIncludeSubfolders,
                )}
                {toggle("Show folder notes", |c| c.show_folder_notes, ConfigChange::ShowFolderNotes)}
                {toggle(
                    "Disable collapse icon for folder notes",
                    |c| c.disable_collapse_icon,
                    ConfigChange::DisableCollapseIcon,
                )}
                {toggle(
                    "Store collapsed condition",
                    |c| c.store_folder_condition,
                    ConfigChange::StoreFolderCondition,
                )}
                {toggle("Collapse all by default", |c| c.always_collapse, ConfigChange::AlwaysCollapse)}
                {toggle("Auto sync", |c| c.auto_sync, ConfigChange::AutoSync)}
                {toggle("Allow drag and drop", |c| c.allow_drag_and_drop, ConfigChange::AllowDragAndDrop)}
                {toggle("Use front matter title", |c| c.fmtp_integration, ConfigChange::FmtpIntegration)}
            </section>

            <section class=css::section>
                {toggle("Use actual links", |c| c.use_actual_links, ConfigChange::UseActualLinks)}
                {toggle("Hide link list", |c| c.hide_link_list, ConfigChange::HideLinkList)}
                {toggle("Hide folder overview", |c| c.hide_folder_overview, ConfigChange::HideFolderOverview)}
                {toggle("Use wikilinks", |c| c.use_wikilinks, ConfigChange::UseWikilinks)}
            </section>
        </aside>
    }
}

fn style_name(style: OverviewStyle) -> &'static str {
    match style {
        OverviewStyle::List => "list",
        OverviewStyle::Explorer => "explorer",
        OverviewStyle::Grid => "grid",
    }
}

fn sort_name(sort: SortBy) -> &'static str {
    match sort {
        SortBy::Name => "name",
        SortBy::Created => "created",
        SortBy::Modified => "modified",
    }
}
