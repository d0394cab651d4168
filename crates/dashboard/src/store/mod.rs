//! Centralized application state
//!
//! - `AppState` holds one struct per slice
//! - `Action` is the only way to change it; `reduce` applies an action
//!   synchronously and reports whether anything was accepted
//! - `Store` wraps the state behind a lock, counts revisions and lets views
//!   wait for changes
//!
//! Reducers never perform I/O. Remote calls live in `crate::dispatch`.

pub mod albums;
pub mod auth;
pub mod comments;
pub mod navigation;
pub mod notifications;
pub mod posts;
pub mod slice;
pub mod theme;
pub mod todos;

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::trace;

pub use albums::{AlbumsAction, AlbumsState};
pub use auth::{AuthAction, AuthState};
pub use comments::{CommentsAction, CommentsState};
pub use navigation::{NavigationAction, NavigationState, View};
pub use notifications::{NotificationsAction, NotificationsState};
pub use posts::{PostsAction, PostsState};
pub use slice::{RequestTicket, SliceStatus};
pub use theme::{ThemeAction, ThemeState};
pub use todos::{TodosAction, TodosState};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub posts: PostsState,
    pub comments: CommentsState,
    pub todos: TodosState,
    pub albums: AlbumsState,
    pub notifications: NotificationsState,
    pub theme: ThemeState,
    pub navigation: NavigationState,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.auth.active_user.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthAction),
    Posts(PostsAction),
    Comments(CommentsAction),
    Todos(TodosAction),
    Albums(AlbumsAction),
    Notifications(NotificationsAction),
    Theme(ThemeAction),
    Navigation(NavigationAction),
}

macro_rules! impl_from_slice_action {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_slice_action!(
    Auth(AuthAction),
    Posts(PostsAction),
    Comments(CommentsAction),
    Todos(TodosAction),
    Albums(AlbumsAction),
    Notifications(NotificationsAction),
    Theme(ThemeAction),
    Navigation(NavigationAction),
);

/// Root reducer
///
/// Changing the active user resets every user-scoped slice. The reset also
/// forgets their request tickets, so responses still in flight for the
/// previous session are dropped when they arrive.
pub fn reduce(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::Auth(action) => {
            let changed = auth::reduce(&mut state.auth, action);
            if action.changes_session() {
                state.posts = PostsState::default();
                comments::reduce(&mut state.comments, &CommentsAction::Clear);
                todos::reduce(&mut state.todos, &TodosAction::Clear);
                albums::reduce(&mut state.albums, &AlbumsAction::Clear);
                let authenticated = state.is_authenticated();
                navigation::on_session_change(&mut state.navigation, authenticated);
            }
            changed
        }
        Action::Posts(action) => posts::reduce(&mut state.posts, action),
        Action::Comments(action) => comments::reduce(&mut state.comments, action),
        Action::Todos(action) => todos::reduce(&mut state.todos, action),
        Action::Albums(action) => albums::reduce(&mut state.albums, action),
        Action::Notifications(action) => notifications::reduce(&mut state.notifications, action),
        Action::Theme(action) => theme::reduce(&mut state.theme, action),
        Action::Navigation(action) => {
            let authenticated = state.is_authenticated();
            navigation::reduce(&mut state.navigation, action, authenticated)
        }
    }
}

/// Single source of truth for the dashboard
///
/// Every `dispatch` runs the root reducer to completion under the write lock,
/// so updates never interleave. Accepted actions bump the revision, which
/// subscribers observe through a `watch` channel.
pub struct Store {
    state: RwLock<AppState>,
    revision: watch::Sender<u64>,
    tickets: AtomicU64,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(initial),
            revision,
            tickets: AtomicU64::new(0),
        }
    }

    /// Apply an action. Returns `false` when the reducer rejected it
    /// (stale response, duplicate, or a transition that is not allowed).
    pub fn dispatch(&self, action: impl Into<Action>) -> bool {
        let action = action.into();
        let accepted = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            reduce(&mut state, &action)
        };

        if accepted {
            self.revision.send_modify(|revision| *revision += 1);
            trace!("[Store] Applied {:?}", action);
        } else {
            trace!("[Store] Ignored {:?}", action);
        }
        accepted
    }

    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Read part of the state without cloning all of it
    pub fn select<R>(&self, selector: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        selector(&state)
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that changes whenever an action is accepted
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Next ticket for a remote fetch; strictly increasing, never zero
    pub fn next_ticket(&self) -> RequestTicket {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_api::{Album, Post, Todo, User};

    #[test]
    fn switching_user_resets_user_scoped_slices() {
        let store = Store::default();
        store.dispatch(AuthAction::SetActiveUser(User::new(1, "A", "a", "a@x")));
        let ticket = store.next_ticket();
        store.dispatch(PostsAction::FetchStarted { ticket });
        store.dispatch(PostsAction::FetchSucceeded {
            ticket,
            posts: vec![Post {
                id: 1,
                user_id: 1,
                title: "t".to_string(),
                body: "b".to_string(),
            }],
        });
        store.dispatch(NavigationAction::OpenPost(1));

        store.dispatch(AuthAction::SetActiveUser(User::new(2, "B", "b", "b@x")));

        let state = store.snapshot();
        assert!(state.posts.posts.is_empty());
        assert_eq!(state.posts.status, SliceStatus::Idle);
        assert_eq!(state.navigation.view, View::PostsList);
    }

    #[test]
    fn logout_clears_todos_and_the_open_album() {
        let store = Store::default();
        store.dispatch(AuthAction::SetActiveUser(User::new(1, "A", "a", "a@x")));
        let ticket = store.next_ticket();
        store.dispatch(TodosAction::FetchStarted { ticket });
        store.dispatch(TodosAction::FetchSucceeded {
            ticket,
            todos: vec![Todo {
                id: 1,
                user_id: 1,
                title: "t".to_string(),
                completed: false,
            }],
        });
        store.dispatch(TodosAction::ToggleStarted { id: 1 });
        store.dispatch(AlbumsAction::SelectAlbum(Album {
            id: 1,
            user_id: 1,
            title: "a".to_string(),
        }));

        store.dispatch(AuthAction::ClearActiveUser);

        let state = store.snapshot();
        assert!(state.todos.todos.is_empty());
        assert!(state.todos.pending.is_empty());
        assert!(state.albums.selected_album.is_none());
    }

    #[test]
    fn response_for_previous_session_is_dropped() {
        let store = Store::default();
        store.dispatch(AuthAction::SetActiveUser(User::new(1, "A", "a", "a@x")));
        let ticket = store.next_ticket();
        store.dispatch(TodosAction::FetchStarted { ticket });

        store.dispatch(AuthAction::ClearActiveUser);
        let accepted = store.dispatch(TodosAction::FetchSucceeded {
            ticket,
            todos: Vec::new(),
        });

        assert!(!accepted);
        assert_eq!(store.select(|s| s.navigation.view), View::Login);
    }

    #[test]
    fn revision_counts_only_accepted_actions() {
        let store = Store::default();
        let rx = store.subscribe();

        store.dispatch(ThemeAction::Toggle);
        store.dispatch(NavigationAction::OpenProfile);

        assert_eq!(store.revision(), 1);
        assert_eq!(*rx.borrow(), 1);
    }

    #[test]
    fn tickets_are_strictly_increasing() {
        let store = Store::default();
        let first = store.next_ticket();
        let second = store.next_ticket();
        assert!(first > 0);
        assert!(second > first);
    }
}
