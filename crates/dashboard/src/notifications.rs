//! Notification queue driver
//!
//! `NotificationPolicy` maps domain events to messages, `NotificationCenter`
//! owns the auto-hide timers and `NotificationSubscriber` glues the two onto
//! the event bus.

use crate::events::{DomainEvent, EventHandler, Operation};
use crate::store::{NotificationsAction, Store};
use dashboard_api::{Notification, NotificationId, NotificationRequest, Severity};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default delay between closing a notification and dropping it
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);

/// Auto-hide durations per severity, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPolicy {
    pub success_ms: u64,
    pub info_ms: u64,
    pub warning_ms: u64,
    pub error_ms: u64,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            success_ms: 3000,
            info_ms: 3000,
            warning_ms: 4000,
            error_ms: 5000,
        }
    }
}

impl NotificationPolicy {
    /// The message an event produces, if any. Plain list loads stay silent;
    /// only the per-user post load is announced.
    pub fn notification_for(&self, event: &DomainEvent) -> Option<NotificationRequest> {
        let (severity, message) = match event {
            DomainEvent::PostsLoaded {
                user_id: Some(_),
                count,
            } => (
                Severity::Info,
                format!("{} posts have been loaded successfully.", count),
            ),
            DomainEvent::PostCreated { post } => (
                Severity::Success,
                format!("Post \"{}\" has been created successfully.", post.title),
            ),
            DomainEvent::PostUpdated { post } => (
                Severity::Success,
                format!("Post \"{}\" has been updated successfully.", post.title),
            ),
            DomainEvent::PostDeleted { id, title } => (
                Severity::Success,
                format!("Post #{}: \"{}\" has been deleted successfully.", id, title),
            ),
            DomainEvent::PostsDeleted { ids } => (
                Severity::Success,
                format!("{} posts have been deleted successfully.", ids.len()),
            ),
            DomainEvent::OperationFailed { operation, .. } => {
                let severity = match operation {
                    Operation::PersistTheme => Severity::Warning,
                    _ => Severity::Error,
                };
                (severity, failure_message(*operation).to_string())
            }
            _ => return None,
        };

        Some(NotificationRequest::new(severity, message).with_auto_hide(self.duration_for(severity)))
    }

    pub fn duration_for(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Success => self.success_ms,
            Severity::Info => self.info_ms,
            Severity::Warning => self.warning_ms,
            Severity::Error => self.error_ms,
        }
    }
}

fn failure_message(operation: Operation) -> &'static str {
    match operation {
        Operation::LoadUsers => "Error loading users. Please try again.",
        Operation::LoadPosts | Operation::LoadUserPosts => "Error loading posts. Please try again.",
        Operation::CreatePost => "Error creating post. Please try again.",
        Operation::UpdatePost => "Error updating post. Please try again.",
        Operation::DeletePost => "Error deleting post. Please try again.",
        Operation::DeletePosts => "Error deleting posts. Please try again.",
        Operation::LoadComments => "Error loading comments. Please try again.",
        Operation::LoadTodos => "Error loading todos. Please try again.",
        Operation::ToggleTodo => "Error updating todo. Please try again.",
        Operation::LoadAlbums => "Error loading albums. Please try again.",
        Operation::LoadPhotos => "Error loading photos. Please try again.",
        Operation::PersistTheme => "Theme preference could not be saved.",
    }
}

/// Owns one timer task per notification that auto-hides
///
/// Each timer closes its notification when it fires and drops it after the
/// exit delay. Timers are independent: dismissing one notification aborts
/// only its own timer. Dropping the center aborts everything still pending.
pub struct NotificationCenter {
    store: Arc<Store>,
    exit_delay: Duration,
    timers: Arc<Mutex<HashMap<NotificationId, JoinHandle<()>>>>,
}

impl NotificationCenter {
    pub fn new(store: Arc<Store>, exit_delay: Duration) -> Self {
        Self {
            store,
            exit_delay,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Enqueue a notification and start its auto-hide timer
    pub fn show(&self, request: NotificationRequest) -> NotificationId {
        let id = format!("notification-{}", uuid::Uuid::new_v4());
        let notification = Notification::from_request(id.clone(), request);
        let auto_hide = notification.auto_hide_duration;

        debug!(
            "[NotificationCenter] {} {}: {}",
            notification.severity, id, notification.message
        );
        self.store.dispatch(NotificationsAction::Show(notification));

        if auto_hide > 0 {
            self.schedule(id.clone(), Some(Duration::from_millis(auto_hide)));
        }
        id
    }

    /// Close a notification now; it is removed after the exit delay
    pub fn dismiss(&self, id: &str) {
        if let Some(timer) = self.lock_timers().remove(id) {
            timer.abort();
        }
        self.store
            .dispatch(NotificationsAction::Hide(Some(id.to_string())));
        // an aborted timer may have closed it already without removing it
        if self.store.select(|state| state.notifications.get(id).is_some()) {
            self.schedule(id.to_string(), None);
        }
    }

    /// Dismiss the oldest open notification, if any
    pub fn dismiss_first(&self) -> Option<NotificationId> {
        let id = self
            .store
            .select(|state| state.notifications.open().next().map(|n| n.id.clone()))?;
        self.dismiss(&id);
        Some(id)
    }

    pub fn clear_all(&self) {
        for (_, timer) in self.lock_timers().drain() {
            timer.abort();
        }
        self.store.dispatch(NotificationsAction::ClearAll);
    }

    /// Number of timers still running
    pub fn pending_timers(&self) -> usize {
        self.lock_timers().len()
    }

    /// Spawn the timer for `id`. With `hide_after` the task closes the
    /// notification first; either way it removes it after the exit delay.
    fn schedule(&self, id: NotificationId, hide_after: Option<Duration>) {
        let Ok(handle) = Handle::try_current() else {
            warn!(
                "[NotificationCenter] No runtime for timer of {}, removing on close only",
                id
            );
            if hide_after.is_none() {
                self.store.dispatch(NotificationsAction::Remove(Some(id)));
            }
            return;
        };

        let store = self.store.clone();
        let timers = self.timers.clone();
        let exit_delay = self.exit_delay;
        let task_id = id.clone();

        // hold the map lock across spawn so the task can't remove its entry before it exists
        let mut guard = self.lock_timers();
        let task = handle.spawn(async move {
            if let Some(delay) = hide_after {
                tokio::time::sleep(delay).await;
                store.dispatch(NotificationsAction::Hide(Some(task_id.clone())));
            }
            tokio::time::sleep(exit_delay).await;
            store.dispatch(NotificationsAction::Remove(Some(task_id.clone())));
            timers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&task_id);
        });
        if let Some(previous) = guard.insert(id, task) {
            previous.abort();
        }
    }

    fn lock_timers(&self) -> std::sync::MutexGuard<'_, HashMap<NotificationId, JoinHandle<()>>> {
        self.timers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        for (_, timer) in self.lock_timers().drain() {
            timer.abort();
        }
    }
}

/// Turns domain events into queued notifications
pub struct NotificationSubscriber {
    center: Arc<NotificationCenter>,
    policy: NotificationPolicy,
}

impl NotificationSubscriber {
    pub fn new(center: Arc<NotificationCenter>, policy: NotificationPolicy) -> Self {
        Self { center, policy }
    }
}

impl EventHandler for NotificationSubscriber {
    fn handle(&self, event: &DomainEvent) {
        if let Some(request) = self.policy.notification_for(event) {
            self.center.show(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_api::Post;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: "body text".to_string(),
        }
    }

    #[test]
    fn policy_messages() {
        let policy = NotificationPolicy::default();

        let loaded = policy
            .notification_for(&DomainEvent::PostsLoaded {
                user_id: Some(1),
                count: 3,
            })
            .unwrap();
        assert_eq!(loaded.message, "3 posts have been loaded successfully.");
        assert_eq!(loaded.severity, Severity::Info);
        assert_eq!(loaded.auto_hide_duration, Some(3000));

        let deleted = policy
            .notification_for(&DomainEvent::PostDeleted {
                id: 5,
                title: "hello".to_string(),
            })
            .unwrap();
        assert_eq!(deleted.message, "Post #5: \"hello\" has been deleted successfully.");

        let created = policy
            .notification_for(&DomainEvent::PostCreated {
                post: post(101, "New one"),
            })
            .unwrap();
        assert_eq!(created.message, "Post \"New one\" has been created successfully.");
        assert_eq!(created.severity, Severity::Success);

        let failed = policy
            .notification_for(&DomainEvent::OperationFailed {
                operation: Operation::DeletePosts,
                message: "HTTP 500".to_string(),
            })
            .unwrap();
        assert_eq!(failed.message, "Error deleting posts. Please try again.");
        assert_eq!(failed.auto_hide_duration, Some(5000));
    }

    #[test]
    fn plain_loads_are_silent() {
        let policy = NotificationPolicy::default();
        assert!(
            policy
                .notification_for(&DomainEvent::PostsLoaded {
                    user_id: None,
                    count: 100
                })
                .is_none()
        );
        assert!(
            policy
                .notification_for(&DomainEvent::CommentsLoaded {
                    post_id: 1,
                    count: 5
                })
                .is_none()
        );
    }

    #[test]
    fn theme_persistence_failure_is_a_warning() {
        let request = NotificationPolicy::default()
            .notification_for(&DomainEvent::OperationFailed {
                operation: Operation::PersistTheme,
                message: "read-only".to_string(),
            })
            .unwrap();
        assert_eq!(request.severity, Severity::Warning);
        assert_eq!(request.auto_hide_duration, Some(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_then_is_removed_after_exit_delay() {
        let store = Arc::new(Store::default());
        let center = NotificationCenter::new(store.clone(), DEFAULT_EXIT_DELAY);

        let id = center.show(NotificationRequest::new(Severity::Info, "hi").with_auto_hide(1000));
        assert!(id.starts_with("notification-"));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let closed = store.select(|s| s.notifications.get(&id).map(|n| n.open));
        assert_eq!(closed, Some(false));

        tokio::time::sleep(DEFAULT_EXIT_DELAY).await;
        assert!(store.select(|s| s.notifications.items.is_empty()));
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_never_expires() {
        let store = Arc::new(Store::default());
        let center = NotificationCenter::new(store.clone(), DEFAULT_EXIT_DELAY);

        center.show(NotificationRequest::new(Severity::Error, "sticky").with_auto_hide(0));
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(store.select(|s| s.notifications.open().count()), 1);
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_leaves_other_timers_alone() {
        let store = Arc::new(Store::default());
        let center = NotificationCenter::new(store.clone(), DEFAULT_EXIT_DELAY);

        let first = center.show(NotificationRequest::new(Severity::Info, "a").with_auto_hide(5000));
        let second = center.show(NotificationRequest::new(Severity::Info, "b").with_auto_hide(5000));

        center.dismiss(&first);
        tokio::time::sleep(Duration::from_millis(400)).await;

        let ids: Vec<String> = store.select(|s| s.notifications.items.iter().map(|n| n.id.clone()).collect());
        assert_eq!(ids, vec![second.clone()]);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(store.select(|s| s.notifications.items.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_center_aborts_timers() {
        let store = Arc::new(Store::default());
        let center = NotificationCenter::new(store.clone(), DEFAULT_EXIT_DELAY);
        center.show(NotificationRequest::new(Severity::Info, "a").with_auto_hide(1000));

        drop(center);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(store.select(|s| s.notifications.open().count()), 1);
    }
}
