//! Handler table
//!
//! Handlers are registered from the caller's task and invoked from the session
//! task, so the table is shared behind `Arc` and never holds a lock while a
//! handler runs.

use crate::error::GatewayError;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// Callback for a named dispatch event
pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Callback for errors the session recovers from
pub type ErrorHandler = Arc<dyn Fn(&GatewayError) + Send + Sync>;

/// Event name to handler mapping
#[derive(Default)]
pub struct EventHandlers {
    handlers: DashMap<String, EventHandler>,
    error_handler: RwLock<Option<ErrorHandler>>,
}

impl EventHandlers {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register `handler` for `event`, replacing any previous one
    ///
    /// Returns `true` if a handler was replaced.
    pub fn register<F>(&self, event: impl Into<String>, handler: F) -> bool
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.handlers
            .insert(event.into(), Arc::new(handler))
            .is_some()
    }

    /// Remove the handler for `event`
    pub fn unregister(&self, event: &str) -> bool {
        self.handlers.remove(event).is_some()
    }

    /// Check if a handler is registered for `event`
    #[must_use]
    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke the handler for `event` with `payload`
    ///
    /// Returns `false` when nothing is registered; the event is dropped.
    pub fn dispatch(&self, event: &str, payload: Value) -> bool {
        // Clone out of the shard guard so a handler may register handlers
        let handler = self.handlers.get(event).map(|entry| Arc::clone(entry.value()));

        match handler {
            Some(handler) => {
                handler(payload);
                true
            }
            None => {
                tracing::trace!(event = %event, "No handler registered, event dropped");
                false
            }
        }
    }

    /// Set the error hook, replacing any previous one
    pub fn set_error_handler<F>(&self, handler: F)
    where
        F: Fn(&GatewayError) + Send + Sync + 'static,
    {
        *self.error_handler.write() = Some(Arc::new(handler));
    }

    /// Report a recoverable error to the error hook, if any
    pub fn report_error(&self, error: &GatewayError) {
        let handler = self.error_handler.read().clone();
        if let Some(handler) = handler {
            handler(error);
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("events", &self.handlers.len())
            .field("error_handler", &self.error_handler.read().is_some())
            .finish()
    }
}
