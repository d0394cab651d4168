use dashboard_api::{Comment, PostId};

use super::slice::{RequestTicket, SliceStatus, is_current};

/// Comments of the post currently open in the detail view.
/// Each fetch replaces the collection wholesale.
#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    pub comments: Vec<Comment>,
    pub status: SliceStatus,
    pub error: Option<String>,
    pub current_post_id: Option<PostId>,
    pub latest_ticket: Option<RequestTicket>,
}

#[derive(Debug, Clone)]
pub enum CommentsAction {
    FetchStarted {
        ticket: RequestTicket,
    },
    FetchSucceeded {
        ticket: RequestTicket,
        post_id: PostId,
        comments: Vec<Comment>,
    },
    FetchFailed {
        ticket: RequestTicket,
        error: String,
    },
    Clear,
}

pub fn reduce(state: &mut CommentsState, action: &CommentsAction) -> bool {
    match action {
        CommentsAction::FetchStarted { ticket } => {
            state.status = SliceStatus::Loading;
            state.error = None;
            state.latest_ticket = Some(*ticket);
            true
        }
        CommentsAction::FetchSucceeded {
            ticket,
            post_id,
            comments,
        } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Succeeded;
            state.comments = comments.clone();
            state.current_post_id = Some(*post_id);
            true
        }
        CommentsAction::FetchFailed { ticket, error } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        CommentsAction::Clear => {
            // dropping the ticket also discards any fetch still in flight
            *state = CommentsState::default();
            true
        }
    }
}
