//! Domain events published by dispatchers
//!
//! Dispatchers describe what happened; they never enqueue notifications or
//! touch other slices themselves. Two kinds of listeners:
//! - `EventHandler`s registered on the bus run inline, in registration order,
//!   before `publish` returns (the notification subscriber is one)
//! - `subscribe()`/`stream()` hand out broadcast receivers for observers that
//!   live on their own task; slow receivers may lag and miss events

use dashboard_api::{AlbumId, Post, PostId, ThemeMode, Todo, UserId};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

/// The operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadUsers,
    LoadPosts,
    LoadUserPosts,
    CreatePost,
    UpdatePost,
    DeletePost,
    DeletePosts,
    LoadComments,
    LoadTodos,
    ToggleTodo,
    LoadAlbums,
    LoadPhotos,
    PersistTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    UsersLoaded { count: usize },
    UserSelected { user_id: UserId },
    LoggedOut,
    PostsLoaded { user_id: Option<UserId>, count: usize },
    PostCreated { post: Post },
    PostUpdated { post: Post },
    PostDeleted { id: PostId, title: String },
    PostsDeleted { ids: Vec<PostId> },
    CommentsLoaded { post_id: PostId, count: usize },
    TodosLoaded { user_id: UserId, count: usize },
    TodoToggled { todo: Todo },
    AlbumsLoaded { user_id: UserId, count: usize },
    PhotosLoaded { album_id: AlbumId, count: usize },
    ThemeChanged { mode: ThemeMode },
    OperationFailed { operation: Operation, message: String },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &DomainEvent);
}

pub struct EventBus {
    handlers: RwLock<Vec<Arc<dyn EventHandler>>>,
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            handlers: RwLock::new(Vec::new()),
            tx,
        }
    }

    pub fn register(&self, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(handler);
    }

    pub fn publish(&self, event: DomainEvent) {
        debug!("[EventBus] {:?}", event);

        // handlers may publish in turn, so don't hold the lock while calling them
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for handler in &handlers {
            handler.handle(&event);
        }

        // Ignore errors if no receivers (fire-and-forget)
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Events as a stream; lagged gaps are skipped
    pub fn stream(&self) -> impl Stream<Item = DomainEvent> + Send + 'static {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|event| event.ok())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<DomainEvent>>,
    }

    impl EventHandler for Recorder {
        fn handle(&self, event: &DomainEvent) {
            self.seen.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn handlers_run_before_publish_returns() {
        let bus = EventBus::default();
        let recorder = Arc::new(Recorder::default());
        bus.register(recorder.clone());

        bus.publish(DomainEvent::LoggedOut);
        bus.publish(DomainEvent::UsersLoaded { count: 2 });

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![DomainEvent::LoggedOut, DomainEvent::UsersLoaded { count: 2 }]
        );
    }

    #[tokio::test]
    async fn stream_receives_published_events() {
        let bus = EventBus::default();
        let mut events = Box::pin(bus.stream());

        bus.publish(DomainEvent::PostsDeleted { ids: vec![1, 2] });

        assert_eq!(
            events.next().await,
            Some(DomainEvent::PostsDeleted { ids: vec![1, 2] })
        );
    }
}
