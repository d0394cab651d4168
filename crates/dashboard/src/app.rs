//! Composition root
//!
//! `Dashboard::builder()` wires the store, event bus, notification center and
//! dispatcher together. Frontends hold a `Dashboard` and nothing global.
//! The view-level operations here combine dispatcher calls the way a screen
//! needs them (validate then submit, open a post and load its comments).

use crate::config::DashboardConfig;
use crate::dispatch::Dispatcher;
use crate::error::{DashboardError, Result};
use crate::events::{DomainEvent, EventBus};
use crate::notifications::{NotificationCenter, NotificationSubscriber};
use crate::selectors::PostSelection;
use crate::store::{AppState, NavigationAction, Store, ThemeAction, View};
use crate::theme_store::{FileThemeStore, MemoryThemeStore, ThemeStore};
use crate::validation::validate_post_form;
use dashboard_api::{Post, PostDraft, PostId, Todo, TodoId, UserId};
use dashboard_jsonplaceholder::{JsonPlaceholderClient, RestApi};
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::info;

#[derive(Default)]
pub struct DashboardBuilder {
    config: Option<DashboardConfig>,
    api: Option<Arc<dyn RestApi>>,
    theme_store: Option<Arc<dyn ThemeStore>>,
}

impl DashboardBuilder {
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this API instead of a JSONPlaceholder client for `config.base_url`
    pub fn api(mut self, api: Arc<dyn RestApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn theme_store(mut self, theme_store: Arc<dyn ThemeStore>) -> Self {
        self.theme_store = Some(theme_store);
        self
    }

    pub fn build(self) -> Result<Dashboard> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let api: Arc<dyn RestApi> = match self.api {
            Some(api) => api,
            None => Arc::new(JsonPlaceholderClient::with_timeout(
                &config.base_url,
                config.request_timeout(),
            )?),
        };

        let theme_store: Arc<dyn ThemeStore> = match self.theme_store {
            Some(theme_store) => theme_store,
            None => match config.theme_file_path() {
                Some(path) => Arc::new(FileThemeStore::new(path)),
                None => Arc::new(MemoryThemeStore::default()),
            },
        };

        let store = Arc::new(Store::default());
        let mode = theme_store.load();
        store.dispatch(ThemeAction::Set(mode));

        let bus = Arc::new(EventBus::new(config.event_capacity));
        let notifications = Arc::new(NotificationCenter::new(
            store.clone(),
            config.notifications.exit_delay(),
        ));
        bus.register(Arc::new(NotificationSubscriber::new(
            notifications.clone(),
            config.notifications.policy(),
        )));

        let dispatcher = Dispatcher::new(store.clone(), api, bus.clone(), theme_store);

        info!("[Dashboard] Ready (theme {})", mode);
        Ok(Dashboard {
            config,
            store,
            bus,
            notifications,
            dispatcher,
        })
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    store: Arc<Store>,
    bus: Arc<EventBus>,
    notifications: Arc<NotificationCenter>,
    dispatcher: Dispatcher,
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    pub fn snapshot(&self) -> AppState {
        self.store.snapshot()
    }

    pub fn events(&self) -> impl Stream<Item = DomainEvent> + Send + 'static {
        self.bus.stream()
    }

    fn active_user_id(&self) -> Result<UserId> {
        self.store
            .select(|state| state.auth.active_user.as_ref().map(|u| u.id))
            .ok_or(DashboardError::NotAuthenticated)
    }

    fn loaded_post(&self, id: PostId) -> Result<Post> {
        self.store
            .select(|state| state.posts.get(id).cloned())
            .ok_or(DashboardError::UnknownPost(id))
    }

    /// Validate the form and create a post for the active user
    pub async fn submit_new_post(&self, title: &str, body: &str) -> Result<Post> {
        validate_post_form(title, body)?;
        let user_id = self.active_user_id()?;
        let draft = PostDraft::new(user_id, title.trim(), body.trim());
        Ok(self.dispatcher.create_post(draft).await?)
    }

    /// Validate the form and save it over a loaded post
    pub async fn submit_post_edit(&self, id: PostId, title: &str, body: &str) -> Result<Post> {
        validate_post_form(title, body)?;
        let mut post = self.loaded_post(id)?;
        post.title = title.trim().to_string();
        post.body = body.trim().to_string();
        Ok(self.dispatcher.update_post(post).await?)
    }

    pub async fn delete_post(&self, id: PostId) -> Result<()> {
        let post = self.loaded_post(id)?;
        self.dispatcher.delete_post(&post).await?;
        if self.store.select(|state| state.navigation.view) == (View::PostDetail { post_id: id }) {
            self.dispatcher.navigate(NavigationAction::Back);
        }
        Ok(())
    }

    /// Bulk delete whatever `selection` resolves to; returns the ids removed
    pub async fn delete_selected(&self, selection: &PostSelection) -> Result<Vec<PostId>> {
        let ids = self.store.select(|state| selection.resolve(&state.posts.posts));
        self.dispatcher.delete_posts(&ids).await?;
        Ok(ids)
    }

    /// Open the detail view of a post and load its comments
    pub async fn open_post(&self, id: PostId) -> Result<()> {
        self.active_user_id()?;
        self.dispatcher.navigate(NavigationAction::OpenPost(id));
        self.dispatcher.fetch_comments(id).await?;
        Ok(())
    }

    /// Open the profile and load the active user's todos and albums together
    pub async fn open_profile(&self) -> Result<()> {
        let user_id = self.active_user_id()?;
        self.dispatcher.navigate(NavigationAction::OpenProfile);
        let (todos, albums) = futures::join!(
            self.dispatcher.fetch_todos(user_id),
            self.dispatcher.fetch_albums(user_id)
        );
        todos?;
        albums?;
        Ok(())
    }

    pub fn open_gallery(&self) -> bool {
        self.dispatcher.navigate(NavigationAction::OpenGallery)
    }

    /// Step back one level. Inside the gallery an open album closes first;
    /// leaving a post drops its comments.
    pub fn back(&self) -> bool {
        let (view, album_open) = self.store.select(|state| {
            (state.navigation.view, state.albums.selected_album.is_some())
        });
        match view {
            View::Gallery if album_open => {
                self.dispatcher.close_album();
                true
            }
            View::PostDetail { .. } => {
                self.dispatcher.clear_comments();
                self.dispatcher.navigate(NavigationAction::Back)
            }
            _ => self.dispatcher.navigate(NavigationAction::Back),
        }
    }

    /// Flip the completed flag of a loaded todo
    ///
    /// Refused while a previous toggle of the same todo is in flight, since
    /// the flag it would flip is not settled yet.
    pub async fn toggle_todo(&self, id: TodoId) -> Result<Todo> {
        let (completed, pending) = self.store.select(|state| {
            (
                state.todos.get(id).map(|todo| todo.completed),
                state.todos.pending.contains(&id),
            )
        });
        let completed = completed.ok_or(DashboardError::UnknownTodo(id))?;
        if pending {
            return Err(DashboardError::TodoPending(id));
        }
        Ok(self.dispatcher.toggle_todo(id, !completed).await?)
    }
}
