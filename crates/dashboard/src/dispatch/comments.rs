use dashboard_api::{ApiResult, Comment, PostId};

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::CommentsAction;

impl Dispatcher {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        let ticket = self.store.next_ticket();
        self.store.dispatch(CommentsAction::FetchStarted { ticket });

        match self.api.list_post_comments(post_id).await {
            Ok(comments) => {
                let count = comments.len();
                if self.store.dispatch(CommentsAction::FetchSucceeded {
                    ticket,
                    post_id,
                    comments: comments.clone(),
                }) {
                    self.publish(DomainEvent::CommentsLoaded { post_id, count });
                } else {
                    self.stale(Operation::LoadComments);
                }
                Ok(comments)
            }
            Err(err) => {
                if self.store.dispatch(CommentsAction::FetchFailed {
                    ticket,
                    error: err.to_string(),
                }) {
                    self.report_failure(Operation::LoadComments, &err);
                } else {
                    self.stale(Operation::LoadComments);
                }
                Err(err)
            }
        }
    }

    pub fn clear_comments(&self) {
        self.store.dispatch(CommentsAction::Clear);
    }
}
