#![allow(dead_code)]

use dashboard::api::{ApiError, Notification, Post, Severity, User};
use dashboard::{Dashboard, MemoryThemeStore};
use dashboard_jsonplaceholder::FakeRestApi;
use std::sync::Arc;

pub fn build_dashboard(api: &Arc<FakeRestApi>) -> Dashboard {
    Dashboard::builder()
        .api(api.clone())
        .theme_store(Arc::new(MemoryThemeStore::default()))
        .build()
        .expect("dashboard builds with defaults")
}

pub fn server_error(path: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        url: format!("fake://{}", path),
        body: "boom".to_string(),
    }
}

pub fn post(id: u64, user_id: u64) -> Post {
    Post {
        id,
        user_id,
        title: format!("post {}", id),
        body: format!("body of post {}", id),
    }
}

/// One user owning three posts, a second user owning two
pub fn small_api() -> Arc<FakeRestApi> {
    Arc::new(
        FakeRestApi::empty()
            .with_users(vec![
                User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
                User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
            ])
            .with_posts(vec![
                post(1, 1),
                post(2, 1),
                post(3, 1),
                post(4, 2),
                post(5, 2),
            ]),
    )
}

pub fn notifications_with(dashboard: &Dashboard, severity: Severity) -> Vec<Notification> {
    dashboard.store().select(|state| {
        state
            .notifications
            .items
            .iter()
            .filter(|n| n.severity == severity)
            .cloned()
            .collect()
    })
}

pub fn post_ids(dashboard: &Dashboard) -> Vec<u64> {
    dashboard
        .store()
        .select(|state| state.posts.posts.iter().map(|p| p.id).collect())
}
