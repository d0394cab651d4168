//! Posts of the active user
//!
//! Three independent statuses: `status` for list fetches, `delete_status` for
//! single and bulk deletes, `submit_status` for the create/edit form.

use dashboard_api::{Post, PostId};
use std::collections::HashSet;

use super::slice::{RequestTicket, SliceStatus, is_current};

#[derive(Debug, Clone, Default)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub status: SliceStatus,
    pub error: Option<String>,
    pub delete_status: SliceStatus,
    pub submit_status: SliceStatus,
    pub latest_ticket: Option<RequestTicket>,
}

impl PostsState {
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum PostsAction {
    FetchStarted { ticket: RequestTicket },
    FetchSucceeded { ticket: RequestTicket, posts: Vec<Post> },
    FetchFailed { ticket: RequestTicket, error: String },
    DeleteStarted,
    /// Remote deletion acknowledged for every id
    DeleteSucceeded { ids: Vec<PostId> },
    DeleteFailed { error: String },
    SubmitStarted,
    Created(Post),
    Updated(Post),
    SubmitFailed { error: String },
    ResetSubmitStatus,
}

pub fn reduce(state: &mut PostsState, action: &PostsAction) -> bool {
    match action {
        PostsAction::FetchStarted { ticket } => {
            state.status = SliceStatus::Loading;
            state.error = None;
            state.latest_ticket = Some(*ticket);
            true
        }
        PostsAction::FetchSucceeded { ticket, posts } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Succeeded;
            state.posts = posts.clone();
            true
        }
        PostsAction::FetchFailed { ticket, error } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        PostsAction::DeleteStarted => {
            state.delete_status = SliceStatus::Loading;
            state.error = None;
            true
        }
        PostsAction::DeleteSucceeded { ids } => {
            let removed: HashSet<PostId> = ids.iter().copied().collect();
            state.delete_status = SliceStatus::Succeeded;
            state.posts.retain(|post| !removed.contains(&post.id));
            true
        }
        PostsAction::DeleteFailed { error } => {
            state.delete_status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        PostsAction::SubmitStarted => {
            state.submit_status = SliceStatus::Loading;
            state.error = None;
            true
        }
        PostsAction::Created(post) => {
            state.submit_status = SliceStatus::Succeeded;
            // ids stay unique even if the server hands out one we already hold
            state.posts.retain(|p| p.id != post.id);
            state.posts.insert(0, post.clone());
            true
        }
        PostsAction::Updated(post) => {
            state.submit_status = SliceStatus::Succeeded;
            if let Some(existing) = state.posts.iter_mut().find(|p| p.id == post.id) {
                *existing = post.clone();
            }
            true
        }
        PostsAction::SubmitFailed { error } => {
            state.submit_status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        PostsAction::ResetSubmitStatus => {
            state.submit_status = SliceStatus::Idle;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn post(id: PostId) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("title {}", id),
            body: format!("body of post {}", id),
        }
    }

    fn loaded(ids: &[PostId]) -> PostsState {
        let mut state = PostsState::default();
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 1 });
        reduce(
            &mut state,
            &PostsAction::FetchSucceeded {
                ticket: 1,
                posts: ids.iter().copied().map(post).collect(),
            },
        );
        state
    }

    #[test]
    fn fetch_marks_loading_then_succeeded() {
        let mut state = PostsState::default();
        state.error = Some("old".to_string());
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 4 });
        assert!(state.status.is_loading());
        assert!(state.error.is_none());

        reduce(
            &mut state,
            &PostsAction::FetchSucceeded {
                ticket: 4,
                posts: vec![post(1), post(2), post(3)],
            },
        );
        assert_eq!(state.status, SliceStatus::Succeeded);
        assert_eq!(state.posts.len(), 3);
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut state = PostsState::default();
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 1 });
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 2 });

        let applied = reduce(
            &mut state,
            &PostsAction::FetchSucceeded {
                ticket: 1,
                posts: vec![post(99)],
            },
        );
        assert!(!applied);
        assert!(state.posts.is_empty());
        assert!(state.status.is_loading());

        assert!(reduce(
            &mut state,
            &PostsAction::FetchSucceeded {
                ticket: 2,
                posts: vec![post(5)],
            },
        ));
        assert_eq!(state.posts, vec![post(5)]);
    }

    #[test]
    fn failed_fetch_keeps_previous_posts() {
        let mut state = loaded(&[1, 2]);
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 2 });
        reduce(
            &mut state,
            &PostsAction::FetchFailed {
                ticket: 2,
                error: "boom".to_string(),
            },
        );
        assert_eq!(state.status, SliceStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.posts, vec![post(1), post(2)]);
    }

    #[test]
    fn created_post_goes_first_and_replaces_duplicate_id() {
        let mut state = loaded(&[1, 2]);
        let mut fresh = post(2);
        fresh.title = "replacement".to_string();
        reduce(&mut state, &PostsAction::Created(fresh.clone()));

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[0], fresh);
        assert_eq!(state.submit_status, SliceStatus::Succeeded);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut state = loaded(&[1, 2, 3]);
        let mut edited = post(2);
        edited.body = "edited body text".to_string();
        reduce(&mut state, &PostsAction::Updated(edited.clone()));
        assert_eq!(state.posts[1], edited);
        assert_eq!(state.posts.len(), 3);
    }

    #[test]
    fn delete_failure_leaves_collection() {
        let mut state = loaded(&[1, 5, 7]);
        reduce(&mut state, &PostsAction::DeleteStarted);
        reduce(
            &mut state,
            &PostsAction::DeleteFailed {
                error: "HTTP 500".to_string(),
            },
        );
        assert_eq!(state.delete_status, SliceStatus::Failed);
        assert_eq!(state.posts.len(), 3);
    }

    proptest! {
        #[test]
        fn deleting_one_id_removes_exactly_it(
            ids in prop::collection::btree_set(1u64..500, 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let ids: Vec<PostId> = ids.into_iter().collect();
            let target = ids[pick.index(ids.len())];
            let mut state = loaded(&ids);

            reduce(&mut state, &PostsAction::DeleteSucceeded { ids: vec![target] });

            prop_assert!(state.get(target).is_none());
            prop_assert_eq!(state.posts.len(), ids.len() - 1);
            let remaining: Vec<PostId> = state.posts.iter().map(|p| p.id).collect();
            let expected: Vec<PostId> = ids.iter().copied().filter(|id| *id != target).collect();
            prop_assert_eq!(remaining, expected);
        }

        #[test]
        fn bulk_delete_removes_exactly_the_set_and_keeps_order(
            ids in prop::collection::btree_set(1u64..500, 0..40),
            mask in prop::collection::vec(any::<bool>(), 40),
        ) {
            let ids: Vec<PostId> = ids.into_iter().collect();
            let doomed: Vec<PostId> = ids
                .iter()
                .zip(mask.iter())
                .filter(|(_, remove)| **remove)
                .map(|(id, _)| *id)
                .collect();
            let mut state = loaded(&ids);

            reduce(&mut state, &PostsAction::DeleteSucceeded { ids: doomed.clone() });

            let remaining: Vec<PostId> = state.posts.iter().map(|p| p.id).collect();
            let expected: Vec<PostId> =
                ids.iter().copied().filter(|id| !doomed.contains(id)).collect();
            prop_assert_eq!(remaining, expected);
        }
    }
}
