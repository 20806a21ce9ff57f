//! Main application layout.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::document::DocumentView;
use crate::components::notice::NoticeStack;
use crate::components::overview::EditPanel;
use crate::components::sidebar::Sidebar;

stylance::import_crate_style!(css, "src/components/shell.module.css");

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    view! {
        <div class=css::shell>
            <Sidebar />
            <main class=css::main>
                <Show
                    when=move || !ctx.loading.get()
                    fallback=|| view! { <div class=css::loading>"Loading vault..."</div> }
                >
                    <DocumentView />
                </Show>
            </main>
            <Show when=move || ctx.editing.with(Option::is_some)>
                <EditPanel />
            </Show>
            <NoticeStack />
        </div>
    }
}
