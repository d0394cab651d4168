//! Async operations against the remote API
//!
//! One method per operation, grouped by slice in the submodules. Every remote
//! operation follows the same shape:
//! 1. dispatch the `*Started` action (with a fresh ticket for fetches)
//! 2. await the `RestApi` call without holding any lock
//! 3. dispatch the success or failure action
//! 4. publish a `DomainEvent` if the store accepted the completion
//!
//! Completions the store rejects (stale tickets, or a session that changed
//! while the call was in flight) are logged and produce no event.

mod albums;
mod auth;
mod comments;
mod posts;
mod theme;
mod todos;

use crate::events::{DomainEvent, EventBus, Operation};
use crate::store::Store;
use crate::theme_store::ThemeStore;
use dashboard_api::UserId;
use dashboard_jsonplaceholder::RestApi;
use std::sync::Arc;
use tracing::{debug, error};

pub struct Dispatcher {
    store: Arc<Store>,
    api: Arc<dyn RestApi>,
    bus: Arc<EventBus>,
    theme_store: Arc<dyn ThemeStore>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<Store>,
        api: Arc<dyn RestApi>,
        bus: Arc<EventBus>,
        theme_store: Arc<dyn ThemeStore>,
    ) -> Self {
        Self {
            store,
            api,
            bus,
            theme_store,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    fn publish(&self, event: DomainEvent) {
        self.bus.publish(event);
    }

    fn report_failure(&self, operation: Operation, err: &dyn std::fmt::Display) {
        error!("[Dispatcher] {:?} failed: {}", operation, err);
        self.publish(DomainEvent::OperationFailed {
            operation,
            message: err.to_string(),
        });
    }

    fn active_user_id(&self) -> Option<UserId> {
        self.store
            .select(|state| state.auth.active_user.as_ref().map(|u| u.id))
    }

    /// Whether the session that started an operation is still the active one
    fn session_unchanged(&self, started_by: Option<UserId>, operation: Operation) -> bool {
        let current = self.active_user_id();
        if current != started_by {
            debug!(
                "[Dispatcher] Dropping {:?} completion: session changed from {:?} to {:?}",
                operation, started_by, current
            );
            return false;
        }
        true
    }

    fn stale(&self, operation: Operation) {
        debug!("[Dispatcher] Dropping stale {:?} response", operation);
    }
}
