use dashboard_api::{ApiError, ApiResult, Post, User, UserId};
use tracing::info;

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::{AuthAction, NavigationAction};

impl Dispatcher {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let ticket = self.store.next_ticket();
        self.store.dispatch(AuthAction::UsersRequested { ticket });

        match self.api.list_users().await {
            Ok(users) => {
                let count = users.len();
                if self.store.dispatch(AuthAction::UsersLoaded {
                    ticket,
                    users: users.clone(),
                }) {
                    self.publish(DomainEvent::UsersLoaded { count });
                } else {
                    self.stale(Operation::LoadUsers);
                }
                Ok(users)
            }
            Err(err) => {
                if self.store.dispatch(AuthAction::UsersFailed {
                    ticket,
                    error: err.to_string(),
                }) {
                    self.report_failure(Operation::LoadUsers, &err);
                } else {
                    self.stale(Operation::LoadUsers);
                }
                Err(err)
            }
        }
    }

    /// Make `user` the active user. Data of any previous session is dropped.
    pub fn select_user(&self, user: User) {
        info!("[Dispatcher] Selecting user {} ({})", user.id, user.username);
        let user_id = user.id;
        self.store.dispatch(AuthAction::SetActiveUser(user));
        self.publish(DomainEvent::UserSelected { user_id });
    }

    /// Select a user by id and load their posts
    ///
    /// The user list is fetched first if it has not been loaded yet.
    #[tracing::instrument(skip(self))]
    pub async fn login(&self, user_id: UserId) -> ApiResult<Vec<Post>> {
        let known = self.store.select(|state| {
            state
                .auth
                .users
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
        });
        let user = match known {
            Some(user) => user,
            None => self
                .fetch_users()
                .await?
                .into_iter()
                .find(|u| u.id == user_id)
                .ok_or_else(|| ApiError::internal(format!("Unknown user {}", user_id)))?,
        };

        self.select_user(user);
        self.fetch_posts_by_user(user_id).await
    }

    pub fn logout(&self) {
        if !self.store.select(|state| state.is_authenticated()) {
            return;
        }
        self.store.dispatch(AuthAction::ClearActiveUser);
        info!("[Dispatcher] Logged out");
        self.publish(DomainEvent::LoggedOut);
    }

    /// Apply a view transition; returns whether the view changed
    pub fn navigate(&self, action: NavigationAction) -> bool {
        self.store.dispatch(action)
    }
}
