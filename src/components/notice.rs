//! Transient notices, newest at the bottom.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::NoticeLevel;

stylance::import_crate_style!(css, "src/components/notice.module.css");

#[component]
pub fn NoticeStack() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::stack role="status" aria-live="polite">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.level {
                        NoticeLevel::Info => css::notice.to_string(),
                        NoticeLevel::Error => format!("{} {}", css::notice, css::error),
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
