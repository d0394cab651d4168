//! Text rendering of store snapshots
//!
//! Every function here is a pure `&AppState -> String`; the launcher prints the
//! result after each command.

use dashboard::selectors::{initials, page_count, paginate, search_posts, DEFAULT_PAGE_SIZE};
use dashboard::store::{AppState, SliceStatus, View};
use dashboard_api::{Notification, Post, User};
use std::fmt::Write;

/// View-local state of the posts list
#[derive(Debug, Clone)]
pub struct ListView {
    pub query: String,
    /// Zero-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListView {
    /// Posts matching the query on the current page, plus the page count
    pub fn visible<'a>(&self, posts: &'a [Post]) -> (Vec<&'a Post>, usize) {
        let matching = search_posts(posts, &self.query);
        let pages = page_count(matching.len(), self.page_size);
        let page = paginate(&matching, self.page, self.page_size).to_vec();
        (page, pages)
    }
}

pub fn render_screen(state: &AppState, list: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Posts Dashboard [{}] ==", state.theme.mode);
    match &state.auth.active_user {
        Some(user) => {
            let _ = writeln!(out, "({}) {} @{}", initials(&user.name), user.name, user.username);
        }
        None => {
            let _ = writeln!(out, "Not logged in");
        }
    }
    out.push('\n');

    match state.navigation.view {
        View::Login => render_login(&mut out, state),
        View::PostsList => render_posts(&mut out, state, list),
        View::PostDetail { post_id } => render_post_detail(&mut out, state, post_id),
        View::Profile => render_profile(&mut out, state),
        View::Gallery => render_gallery(&mut out, state),
    }

    let open: Vec<&Notification> = state.notifications.open().collect();
    if !open.is_empty() {
        out.push('\n');
        for notification in open {
            let _ = writeln!(out, "{}", render_notification(notification));
        }
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    format!(
        "[{}] {} ({})",
        notification.severity, notification.message, notification.id
    )
}

pub fn render_notifications(state: &AppState) -> String {
    if state.notifications.items.is_empty() {
        return "No notifications\n".to_string();
    }
    let mut out = String::new();
    for notification in &state.notifications.items {
        let marker = if notification.open { " " } else { "x" };
        let _ = writeln!(out, "{} {}", marker, render_notification(notification));
    }
    out
}

fn status_line(out: &mut String, what: &str, status: SliceStatus, error: Option<&str>) -> bool {
    match status {
        SliceStatus::Loading => {
            let _ = writeln!(out, "Loading {}...", what);
            true
        }
        SliceStatus::Failed => {
            let _ = writeln!(out, "Could not load {}: {}", what, error.unwrap_or("unknown error"));
            true
        }
        SliceStatus::Idle | SliceStatus::Succeeded => false,
    }
}

fn render_login(out: &mut String, state: &AppState) {
    let _ = writeln!(out, "Select a user with 'login <id>'");
    if status_line(out, "users", state.auth.status, state.auth.error.as_deref()) {
        return;
    }
    if state.auth.users.is_empty() {
        let _ = writeln!(out, "Type 'users' to load the user list");
        return;
    }
    for user in &state.auth.users {
        let _ = writeln!(out, "  {:>3}  {} @{} <{}>", user.id, user.name, user.username, user.email);
    }
}

fn render_posts(out: &mut String, state: &AppState, list: &ListView) {
    let posts = &state.posts;
    if status_line(out, "posts", posts.status, posts.error.as_deref()) {
        return;
    }
    if posts.delete_status == SliceStatus::Loading {
        let _ = writeln!(out, "Deleting...");
    }

    let (page, pages) = list.visible(&posts.posts);
    if !list.query.is_empty() {
        let _ = writeln!(out, "Search: \"{}\"", list.query);
    }
    if page.is_empty() {
        let _ = writeln!(out, "No posts");
        return;
    }
    for post in page {
        let _ = writeln!(out, "  #{:<4} {}", post.id, post.title);
    }
    let _ = writeln!(
        out,
        "Page {}/{} ({} posts)",
        list.page + 1,
        pages.max(1),
        search_posts(&posts.posts, &list.query).len()
    );
}

fn render_post_detail(out: &mut String, state: &AppState, post_id: u64) {
    match state.posts.get(post_id) {
        Some(post) => {
            let _ = writeln!(out, "#{} {}\n\n{}\n", post.id, post.title, post.body);
        }
        None => {
            let _ = writeln!(out, "Post #{} is not loaded\n", post_id);
        }
    }

    let comments = &state.comments;
    if status_line(out, "comments", comments.status, comments.error.as_deref()) {
        return;
    }
    let _ = writeln!(out, "Comments ({})", comments.comments.len());
    for comment in &comments.comments {
        let _ = writeln!(out, "  {} <{}>\n    {}", comment.name, comment.email, comment.body);
    }
}

fn render_user(out: &mut String, user: &User) {
    let _ = writeln!(out, "{} (@{})", user.name, user.username);
    let _ = writeln!(out, "  email    {}", user.email);
    if !user.phone.is_empty() {
        let _ = writeln!(out, "  phone    {}", user.phone);
    }
    if !user.website.is_empty() {
        let _ = writeln!(out, "  website  {}", user.website);
    }
    if !user.address.city.is_empty() {
        let _ = writeln!(
            out,
            "  address  {} {}, {} {}",
            user.address.street, user.address.suite, user.address.zipcode, user.address.city
        );
    }
    if !user.company.name.is_empty() {
        let _ = writeln!(
            out,
            "  company  {} - \"{}\"",
            user.company.name, user.company.catch_phrase
        );
    }
}

fn render_profile(out: &mut String, state: &AppState) {
    if let Some(user) = &state.auth.active_user {
        render_user(out, user);
        out.push('\n');
    }

    let todos = &state.todos;
    if !status_line(out, "todos", todos.status, todos.error.as_deref()) {
        let _ = writeln!(
            out,
            "Todos ({}/{} completed)",
            todos.completed_count(),
            todos.todos.len()
        );
        for todo in &todos.todos {
            let check = if todo.completed { "x" } else { " " };
            let pending = if todos.pending.contains(&todo.id) { " ..." } else { "" };
            let _ = writeln!(out, "  [{}] #{:<4} {}{}", check, todo.id, todo.title, pending);
        }
    }

    out.push('\n');
    let albums = &state.albums;
    if !status_line(out, "albums", albums.status, albums.error.as_deref()) {
        let _ = writeln!(out, "Albums ({}), 'albums' opens the gallery", albums.albums.len());
    }
}

fn render_gallery(out: &mut String, state: &AppState) {
    let albums = &state.albums;
    match &albums.selected_album {
        Some(album) => {
            let _ = writeln!(out, "Album #{} {}", album.id, album.title);
            let status = albums.photo_status_for(album.id);
            if status_line(out, "photos", status, albums.error.as_deref()) {
                return;
            }
            for photo in albums.photos_for(album.id) {
                let _ = writeln!(out, "  #{:<5} {}\n         {}", photo.id, photo.title, photo.thumbnail_url);
            }
        }
        None => {
            if status_line(out, "albums", albums.status, albums.error.as_deref()) {
                return;
            }
            for album in &albums.albums {
                let loaded = match albums.photo_status_for(album.id) {
                    SliceStatus::Succeeded => format!(" ({} photos)", albums.photos_for(album.id).len()),
                    _ => String::new(),
                };
                let _ = writeln!(out, "  #{:<4} {}{}", album.id, album.title, loaded);
            }
            let _ = writeln!(out, "Open one with 'album <id>'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard::store::{reduce, AuthAction, NavigationAction, PostsAction};
    use dashboard_api::User;

    fn logged_in_with_posts(count: u64) -> AppState {
        let mut state = AppState::default();
        reduce(
            &mut state,
            &AuthAction::SetActiveUser(User::new(1, "Leanne Graham", "Bret", "a@b.c")).into(),
        );
        reduce(&mut state, &PostsAction::FetchStarted { ticket: 1 }.into());
        let posts = (1..=count)
            .map(|id| Post {
                id,
                user_id: 1,
                title: format!("title {}", id),
                body: "body".to_string(),
            })
            .collect();
        reduce(&mut state, &PostsAction::FetchSucceeded { ticket: 1, posts }.into());
        state
    }

    #[test]
    fn login_screen_prompts_for_users() {
        let screen = render_screen(&AppState::default(), &ListView::default());
        assert!(screen.contains("Not logged in"));
        assert!(screen.contains("Type 'users'"));
    }

    #[test]
    fn posts_list_is_paginated() {
        let state = logged_in_with_posts(7);
        let screen = render_screen(&state, &ListView::default());

        assert!(screen.contains("(LG) Leanne Graham @Bret"));
        assert!(screen.contains("#5"));
        assert!(!screen.contains("#6"));
        assert!(screen.contains("Page 1/2 (7 posts)"));
    }

    #[test]
    fn search_filters_before_paging() {
        let state = logged_in_with_posts(12);
        let list = ListView {
            query: "title 1".to_string(),
            ..ListView::default()
        };
        // matches 1, 10, 11, 12
        let screen = render_screen(&state, &list);
        assert!(screen.contains("Page 1/1 (4 posts)"));
    }

    #[test]
    fn detail_view_of_missing_post() {
        let mut state = logged_in_with_posts(1);
        reduce(&mut state, &NavigationAction::OpenPost(9).into());
        let screen = render_screen(&state, &ListView::default());
        assert!(screen.contains("Post #9 is not loaded"));
    }
}
