//! Which screen the view layer shows
//!
//! ```text
//! Login      --select user-->  PostsList
//! PostsList  --view post-->    PostDetail  --back--> PostsList
//! any        --open profile--> Profile     --back--> PostsList
//! Profile    --open gallery--> Gallery     --back--> Profile
//! any        --logout-->       Login
//! ```

use dashboard_api::PostId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// No active user
    #[default]
    Login,
    PostsList,
    Profile,
    PostDetail {
        post_id: PostId,
    },
    /// Albums and photos of the active user
    Gallery,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationState {
    pub view: View,
}

#[derive(Debug, Clone, Copy)]
pub enum NavigationAction {
    OpenPostsList,
    OpenProfile,
    OpenPost(PostId),
    OpenGallery,
    Back,
}

/// Apply a user-driven transition. Everything except `Back` needs an active
/// user; transitions that are not allowed leave the view unchanged.
pub fn reduce(state: &mut NavigationState, action: &NavigationAction, authenticated: bool) -> bool {
    if !authenticated {
        return false;
    }
    let next = match (state.view, action) {
        (_, NavigationAction::OpenPostsList) => View::PostsList,
        (_, NavigationAction::OpenProfile) => View::Profile,
        (_, NavigationAction::OpenPost(post_id)) => View::PostDetail { post_id: *post_id },
        (View::Profile | View::Gallery, NavigationAction::OpenGallery) => View::Gallery,
        (current, NavigationAction::OpenGallery) => current,
        (View::Gallery, NavigationAction::Back) => View::Profile,
        (View::PostDetail { .. } | View::Profile, NavigationAction::Back) => View::PostsList,
        (current, NavigationAction::Back) => current,
    };
    let changed = next != state.view;
    state.view = next;
    changed
}

/// Selecting a user lands on the posts list; logging out returns to login
pub fn on_session_change(state: &mut NavigationState, authenticated: bool) {
    state.view = if authenticated {
        View::PostsList
    } else {
        View::Login
    };
}
