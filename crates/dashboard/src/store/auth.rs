//! Simulated login: the user list and the single active user

use dashboard_api::User;

use super::slice::{RequestTicket, SliceStatus, is_current};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub users: Vec<User>,
    /// The "logged in" user; zero or one at any time
    pub active_user: Option<User>,
    pub status: SliceStatus,
    pub error: Option<String>,
    pub latest_ticket: Option<RequestTicket>,
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    UsersRequested { ticket: RequestTicket },
    UsersLoaded { ticket: RequestTicket, users: Vec<User> },
    UsersFailed { ticket: RequestTicket, error: String },
    SetActiveUser(User),
    ClearActiveUser,
}

impl AuthAction {
    /// Whether the action replaces the session, which resets user-scoped slices
    pub fn changes_session(&self) -> bool {
        matches!(self, AuthAction::SetActiveUser(_) | AuthAction::ClearActiveUser)
    }
}

pub fn reduce(state: &mut AuthState, action: &AuthAction) -> bool {
    match action {
        AuthAction::UsersRequested { ticket } => {
            state.status = SliceStatus::Loading;
            state.error = None;
            state.latest_ticket = Some(*ticket);
            true
        }
        AuthAction::UsersLoaded { ticket, users } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Succeeded;
            state.users = users.clone();
            true
        }
        AuthAction::UsersFailed { ticket, error } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        AuthAction::SetActiveUser(user) => {
            state.active_user = Some(user.clone());
            true
        }
        AuthAction::ClearActiveUser => {
            state.active_user = None;
            true
        }
    }
}
