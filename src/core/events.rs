//! Vault change propagation.
//!
//! A small observer layer: the vault produces [`VaultEvent`]s, the
//! [`EventBus`] fans them out to subscribed overviews, and a [`Debouncer`]
//! collapses bursts of events into a single trailing run. The same
//! [`Generation`] counter that powers debouncing also lets an overview drop
//! the results of a render that has been superseded.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::core::vault::is_nested_path;

// =============================================================================
// Vault Events
// =============================================================================

/// A mutation of the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultEvent {
    Created { path: String },
    Deleted { path: String },
    Renamed { from: String, to: String },
    Modified { path: String },
}

impl VaultEvent {
    /// Whether the event changes the shape of the tree (not just file text).
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Modified { .. })
    }

    /// Whether the event affects anything at or beneath `folder`.
    pub fn touches(&self, folder: &str) -> bool {
        let hits = |path: &str| path == folder || is_nested_path(path, folder);
        match self {
            Self::Created { path } | Self::Deleted { path } | Self::Modified { path } => hits(path),
            Self::Renamed { from, to } => hits(from) || hits(to),
        }
    }
}

// =============================================================================
// Event Bus
// =============================================================================

type Listener = Arc<dyn Fn(&VaultEvent) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Fan-out of vault events to subscribers.
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&VaultEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != subscription.0);
        inner.listeners.len() != before
    }

    /// Deliver an event to every listener registered at the time of the call.
    pub fn emit(&self, event: &VaultEvent) {
        // Listeners may (un)subscribe while being notified
        let listeners: Vec<Listener> = {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        trace!(?event, listeners = listeners.len(), "emitting vault event");
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

// =============================================================================
// Generation Counter & Debouncer
// =============================================================================

/// Token identifying one armed run of a [`Generation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter; only the most recently armed ticket is current.
#[derive(Clone, Debug, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, superseding every earlier ticket.
    pub fn arm(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Trailing-edge debouncer with explicit cancellation.
///
/// Each [`schedule`](Self::schedule) supersedes the previous one; a task
/// only runs if nothing else was scheduled (or cancelled) while it waited.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay_ms: u32,
    generation: Generation,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: Generation::new(),
        }
    }

    /// Arm the debouncer and return a future that sleeps for the configured
    /// delay and then runs `task`, unless superseded in the meantime.
    ///
    /// `sleep` builds the timer from a delay in milliseconds (in the browser,
    /// `TimeoutFuture::new`). The ticket is taken immediately, not when the
    /// future is first polled.
    ///
    /// # Returns
    /// `Some(output)` if the task ran, `None` if it was superseded.
    pub fn schedule<S, W, F, T>(
        &self,
        sleep: S,
        task: F,
    ) -> impl Future<Output = Option<T>> + use<S, W, F, T>
    where
        S: FnOnce(u32) -> W,
        W: Future<Output = ()>,
        F: FnOnce() -> T,
    {
        let ticket = self.generation.arm();
        let generation = self.generation.clone();
        let wait = sleep(self.delay_ms);
        async move {
            wait.await;
            if generation.is_current(ticket) {
                Some(task())
            } else {
                trace!("debounced task superseded");
                None
            }
        }
    }

    /// Drop any pending run.
    pub fn cancel(&self) {
        self.generation.cancel();
    }
}
