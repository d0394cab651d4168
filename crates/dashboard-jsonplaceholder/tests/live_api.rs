//! Checks against the public JSONPlaceholder service.
//!
//! These need network access and are ignored by default:
//! `cargo test -p dashboard-jsonplaceholder -- --ignored`

use dashboard_api::PostDraft;
use dashboard_jsonplaceholder::{DEFAULT_BASE_URL, JsonPlaceholderClient, RestApi};

#[tokio::test]
#[ignore]
async fn lists_users_and_their_posts() {
    let client = JsonPlaceholderClient::new(DEFAULT_BASE_URL).unwrap();

    let users = client.list_users().await.unwrap();
    assert_eq!(users.len(), 10);

    let posts = client.list_user_posts(users[0].id).await.unwrap();
    assert!(!posts.is_empty());
    assert!(posts.iter().all(|p| p.user_id == users[0].id));
}

#[tokio::test]
#[ignore]
async fn create_echoes_the_draft() {
    let client = JsonPlaceholderClient::new(DEFAULT_BASE_URL).unwrap();

    let draft = PostDraft::new(1, "Integration title", "Integration body text");
    let post = client.create_post(&draft).await.unwrap();
    assert_eq!(post.title, draft.title);
    assert_eq!(post.user_id, 1);
}

#[tokio::test]
#[ignore]
async fn patching_a_todo_returns_the_record() {
    let client = JsonPlaceholderClient::new(DEFAULT_BASE_URL).unwrap();

    let todo = client.set_todo_completed(1, true).await.unwrap();
    assert_eq!(todo.id, 1);
    assert!(todo.completed);
}
