//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] definition and the
//! vault-level plumbing every overview shares: event fan-out, the per-document
//! write queue and the global link-list resync.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use tracing::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::Shell;
use crate::config::{GLOBAL_RESYNC_DEBOUNCE_MS, NOTICE_TIMEOUT_MS};
use crate::core::error::OverviewError;
use crate::core::events::{Debouncer, EventBus, Subscription, VaultEvent};
use crate::core::index::{OverviewIndex, resync_edits};
use crate::core::overview::persist_collapse;
use crate::core::settings::default_settings;
use crate::core::vault::is_nested_path;
use crate::core::write_queue::{TextEdit, WriteQueue, flush};
use crate::core::{MemoryVault, VaultHost};
use crate::models::{
    EditTarget, GlobalSettings, Notice, NoticeLevel, OverviewConfig, VaultManifest,
};
use crate::utils::dom::{get_hash, now_millis, replace_hash};
use crate::utils::load_manifest;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals or stored
/// values, which are cheap to copy.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The vault every overview reads from.
    pub vault: RwSignal<MemoryVault>,
    /// Plugin-level settings.
    pub settings: StoredValue<GlobalSettings>,
    /// Document shown in the main pane.
    pub active: RwSignal<Option<String>>,
    /// Transient notices, oldest first.
    pub notices: RwSignal<Vec<Notice>>,
    /// Overview open in the edit panel.
    pub editing: RwSignal<Option<EditTarget>>,
    /// Whether the manifest is still loading.
    pub loading: RwSignal<bool>,

    bus: StoredValue<EventBus>,
    writes: StoredValue<WriteQueue>,
    index: StoredValue<OverviewIndex>,
    resync: StoredValue<Debouncer>,
    next_notice: StoredValue<u64>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            vault: RwSignal::new(MemoryVault::empty()),
            settings: StoredValue::new(default_settings()),
            active: RwSignal::new(None),
            notices: RwSignal::new(Vec::new()),
            editing: RwSignal::new(None),
            loading: RwSignal::new(true),
            bus: StoredValue::new(EventBus::new()),
            writes: StoredValue::new(WriteQueue::new()),
            index: StoredValue::new(OverviewIndex::new()),
            resync: StoredValue::new(Debouncer::new(GLOBAL_RESYNC_DEBOUNCE_MS)),
            next_notice: StoredValue::new(0),
        }
    }

    /// Replace the vault with a freshly loaded manifest.
    pub fn load(&self, manifest: &VaultManifest) {
        let vault = MemoryVault::from_manifest(manifest);
        let index = OverviewIndex::build(&vault);
        info!(
            documents = vault.markdown_files().len(),
            overviews = index.len(),
            "vault loaded"
        );

        let hash = get_hash();
        let initial = if vault.get_file(&hash).is_some() {
            Some(hash)
        } else {
            index
                .paths()
                .next()
                .map(str::to_string)
                .or_else(|| vault.markdown_files().first().map(|f| f.path.clone()))
        };

        self.index.set_value(index);
        self.vault.set(vault);
        self.loading.set(false);
        if let Some(path) = initial {
            self.open(&path);
        }
        self.schedule_resync();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn open(&self, path: &str) {
        self.editing.set(None);
        self.active.set(Some(path.to_string()));
        replace_hash(path);
    }

    /// Open a vault file if it can be shown as a document.
    pub fn open_file(&self, path: &str) {
        let markdown = self
            .vault
            .with_untracked(|v| v.get_file(path).is_some_and(|f| f.is_markdown()));
        if markdown {
            self.open(path);
        } else {
            self.notify(NoticeLevel::Info, format!("No viewer for {path}"));
        }
    }

    // ========================================================================
    // Notices
    // ========================================================================

    /// Show a notice that disappears after `NOTICE_TIMEOUT_MS`.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let id = self.next_notice.get_value() + 1;
        self.next_notice.set_value(id);
        self.notices.update(|n| {
            n.push(Notice {
                id,
                level,
                message: message.into(),
            })
        });

        let notices = self.notices;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            notices.update(|n| n.retain(|notice| notice.id != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|notice| notice.id != id));
    }

    // ========================================================================
    // Vault Events
    // ========================================================================

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&VaultEvent) + Send + Sync + 'static,
    {
        self.bus.with_value(|bus| {
            let subscription = bus.subscribe(listener);
            debug!(listeners = bus.listener_count(), "overview subscribed");
            subscription
        })
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.bus.with_value(|bus| bus.unsubscribe(subscription));
    }

    /// Run `f` against the vault's host view.
    pub fn with_host<T>(&self, f: impl FnOnce(&VaultHost<'_>) -> T) -> T {
        self.settings.with_value(|settings| {
            self.vault
                .with_untracked(|vault| f(&VaultHost::new(vault, settings)))
        })
    }

    /// Apply a structural vault mutation and propagate its event.
    pub fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut MemoryVault) -> Result<VaultEvent, OverviewError>,
    {
        let result = self.vault.try_maybe_update(|vault| {
            let result = f(vault);
            (result.is_ok(), result)
        });
        match result {
            Some(Ok(event)) => self.dispatch(event),
            Some(Err(e)) => {
                warn!(error = %e, "vault mutation failed");
                self.notify(NoticeLevel::Error, e.to_string());
            }
            None => {}
        }
    }

    /// Update the index, notify subscribers and, for structural changes,
    /// schedule a global link-list resync.
    fn dispatch(&self, event: VaultEvent) {
        debug!(?event, "vault changed");
        let mut index = self.index.get_value();
        self.vault
            .with_untracked(|vault| index.apply_event(vault, &event));
        self.index.set_value(index);

        // Keep the open document in view across moves
        if let Some(active) = self.active.get_untracked() {
            match &event {
                VaultEvent::Renamed { from, to }
                    if active == *from || is_nested_path(&active, from) =>
                {
                    self.open(&format!("{}{}", to, &active[from.len()..]));
                }
                VaultEvent::Deleted { path } if active == *path || is_nested_path(&active, path) => {
                    self.active.set(None);
                }
                _ => {}
            }
        }

        let bus = self.bus.get_value();
        bus.emit(&event);
        if event.is_structural() {
            self.schedule_resync();
        }
    }

    /// Remember an explorer folder's collapse state without re-rendering.
    pub fn persist_collapse(&self, config: &OverviewConfig, path: &str, collapsed: bool) {
        let changed = self
            .vault
            .try_update_untracked(|vault| persist_collapse(vault, config, path, collapsed))
            .unwrap_or(false);
        if changed {
            debug!(path, collapsed, "folder collapse state stored");
        }
    }

    // ========================================================================
    // Document Writes
    // ========================================================================

    /// Queue a text edit for `path` without applying it yet.
    pub fn enqueue(&self, path: &str, edit: TextEdit) {
        self.writes.update_value(|queue| queue.push(path, edit));
    }

    /// Queue a text edit for `path` and flush the queue.
    pub fn write(&self, path: &str, edit: TextEdit) {
        self.enqueue(path, edit);
        self.flush_writes(path);
    }

    /// Apply every pending edit for `path` in one read-modify-write.
    pub fn flush_writes(&self, path: &str) {
        if !self.writes.with_value(|queue| queue.is_pending(path)) {
            return;
        }
        let mut queue = self.writes.get_value();
        let now = now_millis();
        let result = self.vault.try_maybe_update(|vault| {
            let result = flush(&mut queue, vault, path, now);
            (matches!(result, Ok(Some(_))), result)
        });
        self.writes.set_value(queue);

        match result {
            Some(Ok(Some(event))) => self.dispatch(event),
            Some(Ok(None)) | None => {}
            Some(Err(e)) => {
                error!(path, error = %e, "failed to write document");
                self.notify(NoticeLevel::Error, e.to_string());
            }
        }
    }

    /// Rewrite a document's text with `edit`, if it returns new text.
    pub fn edit_document<F>(&self, path: &str, edit: F)
    where
        F: FnOnce(&str) -> Result<Option<String>, OverviewError>,
    {
        let now = now_millis();
        let mut failure = None;
        let result = self.vault.try_maybe_update(|vault| {
            let result = vault.process(path, now, |text| match edit(text) {
                Ok(updated) => updated,
                Err(e) => {
                    failure = Some(e);
                    None
                }
            });
            (matches!(result, Ok(Some(_))), result)
        });

        match (result, failure) {
            (_, Some(e)) | (Some(Err(e)), None) => {
                error!(path, error = %e, "failed to edit document");
                self.notify(NoticeLevel::Error, e.to_string());
            }
            (Some(Ok(Some(event))), None) => self.dispatch(event),
            _ => {}
        }
    }

    // ========================================================================
    // Global Resync
    // ========================================================================

    /// Debounced rebuild of every indexed link list.
    pub fn schedule_resync(&self) {
        if !self.settings.with_value(|s| s.auto_update_links) {
            return;
        }
        let ctx = *self;
        let run = self.resync.with_value(|debouncer| {
            debouncer.schedule(TimeoutFuture::new, move || {
                ctx.resync_now()
            })
        });
        spawn_local(async move {
            run.await;
        });
    }

    pub fn resync_now(&self) {
        let mut index = self.index.get_value();
        let edits = self.settings.with_value(|settings| {
            self.vault.with_untracked(|vault| {
                resync_edits(&mut index, vault, &VaultHost::new(vault, settings))
            })
        });
        self.index.set_value(index);

        debug!(edits = edits.len(), "global link-list resync");
        for (path, edit) in edits {
            self.enqueue(&path, edit);
        }
        for path in self.writes.with_value(WriteQueue::paths) {
            self.flush_writes(&path);
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Loads the demo vault manifest
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the main Shell component
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let manifest = LocalResource::new(load_manifest);

    Effect::new(move |_| {
        if let Some(result) = manifest.get() {
            match result {
                Ok(manifest) => ctx.load(&manifest),
                Err(e) => {
                    error!(error = %e, "failed to load vault manifest");
                    ctx.loading.set(false);
                    ctx.notify(NoticeLevel::Error, format!("Failed to load vault: {e}"));
                }
            }
        }
    });

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        // Follow manual hash edits and back/forward navigation
        let closure = Closure::wrap(Box::new(move || {
            let hash = get_hash();
            if !hash.is_empty()
                && ctx.active.get_untracked().as_deref() != Some(hash.as_str())
                && ctx.vault.with_untracked(|v| v.get_file(&hash).is_some())
            {
                ctx.open(&hash);
            }
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #1e1e1e;
                    color: #dcddde;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #fb464c; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #999; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #262626;
                            padding: 1rem;
                            border-radius: 4px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #999;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #fb464c;
                                font-size: 0.9rem;
                            ">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #7f6df2;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <Shell />
        </ErrorBoundary>
    }
}
