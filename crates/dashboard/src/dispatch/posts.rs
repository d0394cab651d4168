use dashboard_api::{ApiResult, Post, PostDraft, PostId, UserId};
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{info, warn};

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::PostsAction;

impl Dispatcher {
    /// Load every post on the server, replacing the collection
    #[tracing::instrument(skip(self))]
    pub async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        self.load_posts(None).await
    }

    /// Load one user's posts, replacing the collection
    #[tracing::instrument(skip(self))]
    pub async fn fetch_posts_by_user(&self, user_id: UserId) -> ApiResult<Vec<Post>> {
        self.load_posts(Some(user_id)).await
    }

    async fn load_posts(&self, user_id: Option<UserId>) -> ApiResult<Vec<Post>> {
        let operation = match user_id {
            Some(_) => Operation::LoadUserPosts,
            None => Operation::LoadPosts,
        };
        let ticket = self.store.next_ticket();
        self.store.dispatch(PostsAction::FetchStarted { ticket });

        let result = match user_id {
            Some(user_id) => self.api.list_user_posts(user_id).await,
            None => self.api.list_posts().await,
        };

        match result {
            Ok(posts) => {
                let count = posts.len();
                if self.store.dispatch(PostsAction::FetchSucceeded {
                    ticket,
                    posts: posts.clone(),
                }) {
                    info!("[Dispatcher] Loaded {} posts (user {:?})", count, user_id);
                    self.publish(DomainEvent::PostsLoaded { user_id, count });
                } else {
                    self.stale(operation);
                }
                Ok(posts)
            }
            Err(err) => {
                if self.store.dispatch(PostsAction::FetchFailed {
                    ticket,
                    error: err.to_string(),
                }) {
                    self.report_failure(operation, &err);
                } else {
                    self.stale(operation);
                }
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_post(&self, draft: PostDraft) -> ApiResult<Post> {
        let session = self.active_user_id();
        self.store.dispatch(PostsAction::SubmitStarted);

        let result = self.api.create_post(&draft).await;
        if !self.session_unchanged(session, Operation::CreatePost) {
            return result;
        }

        match result {
            Ok(post) => {
                info!("[Dispatcher] Created post {}", post.id);
                self.store.dispatch(PostsAction::Created(post.clone()));
                self.publish(DomainEvent::PostCreated { post: post.clone() });
                Ok(post)
            }
            Err(err) => {
                self.store.dispatch(PostsAction::SubmitFailed {
                    error: err.to_string(),
                });
                self.report_failure(Operation::CreatePost, &err);
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self, post), fields(post_id = post.id))]
    pub async fn update_post(&self, post: Post) -> ApiResult<Post> {
        let session = self.active_user_id();
        self.store.dispatch(PostsAction::SubmitStarted);

        let result = self.api.update_post(&post).await;
        if !self.session_unchanged(session, Operation::UpdatePost) {
            return result;
        }

        match result {
            Ok(updated) => {
                info!("[Dispatcher] Updated post {}", updated.id);
                self.store.dispatch(PostsAction::Updated(updated.clone()));
                self.publish(DomainEvent::PostUpdated {
                    post: updated.clone(),
                });
                Ok(updated)
            }
            Err(err) => {
                self.store.dispatch(PostsAction::SubmitFailed {
                    error: err.to_string(),
                });
                self.report_failure(Operation::UpdatePost, &err);
                Err(err)
            }
        }
    }

    /// Delete one post; it leaves the collection only once the server acknowledged it
    #[tracing::instrument(skip(self, post), fields(post_id = post.id))]
    pub async fn delete_post(&self, post: &Post) -> ApiResult<()> {
        let session = self.active_user_id();
        self.store.dispatch(PostsAction::DeleteStarted);

        let result = self.api.delete_post(post.id).await;
        if !self.session_unchanged(session, Operation::DeletePost) {
            return result;
        }

        match result {
            Ok(()) => {
                info!("[Dispatcher] Deleted post {}", post.id);
                self.store
                    .dispatch(PostsAction::DeleteSucceeded { ids: vec![post.id] });
                self.publish(DomainEvent::PostDeleted {
                    id: post.id,
                    title: post.title.clone(),
                });
                Ok(())
            }
            Err(err) => {
                self.store.dispatch(PostsAction::DeleteFailed {
                    error: err.to_string(),
                });
                self.report_failure(Operation::DeletePost, &err);
                Err(err)
            }
        }
    }

    /// Delete several posts concurrently
    ///
    /// Repeated ids are sent once. The store changes only after every request
    /// has settled: all acknowledged removes exactly `ids`; any failure is
    /// reported once and the collection is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn delete_posts(&self, ids: &[PostId]) -> ApiResult<()> {
        let mut seen = HashSet::new();
        let ids: Vec<PostId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if ids.is_empty() {
            return Ok(());
        }
        let session = self.active_user_id();
        self.store.dispatch(PostsAction::DeleteStarted);

        let results = join_all(ids.iter().map(|id| self.api.delete_post(*id))).await;
        if !self.session_unchanged(session, Operation::DeletePosts) {
            return results.into_iter().collect();
        }

        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if !failures.is_empty() {
            warn!("[Dispatcher] {} of {} deletions failed", failures.len(), ids.len());
        }
        match failures.into_iter().next() {
            None => {
                info!("[Dispatcher] Deleted {} posts", ids.len());
                self.store.dispatch(PostsAction::DeleteSucceeded { ids: ids.clone() });
                self.publish(DomainEvent::PostsDeleted { ids });
                Ok(())
            }
            Some(first) => {
                self.store.dispatch(PostsAction::DeleteFailed {
                    error: first.to_string(),
                });
                self.report_failure(Operation::DeletePosts, &first);
                Err(first)
            }
        }
    }

    pub fn reset_submit_status(&self) {
        self.store.dispatch(PostsAction::ResetSubmitStatus);
    }
}
