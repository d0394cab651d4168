use async_trait::async_trait;
use dashboard_api::{
    Album, AlbumId, ApiResult, Comment, Photo, Post, PostDraft, PostId, Todo, TodoId, User, UserId,
};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::RestApi;
use crate::http::HttpClient;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Request timeout used by [`JsonPlaceholderClient::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the JSONPlaceholder demo API
pub struct JsonPlaceholderClient {
    http: HttpClient,
}

impl JsonPlaceholderClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = HttpClient::new(base_url, timeout)?;
        info!("[JsonPlaceholderClient] Using base URL {}", http.base_url());
        Ok(Self { http })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl RestApi for JsonPlaceholderClient {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let posts: Vec<Post> = self.http.get("/posts").await?;
        debug!("[JsonPlaceholderClient] Fetched {} posts", posts.len());
        Ok(posts)
    }

    async fn list_user_posts(&self, user_id: UserId) -> ApiResult<Vec<Post>> {
        let posts: Vec<Post> = self.http.get(&format!("/users/{}/posts", user_id)).await?;
        debug!(
            "[JsonPlaceholderClient] Fetched {} posts for user {}",
            posts.len(),
            user_id
        );
        Ok(posts)
    }

    async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post> {
        let post: Post = self.http.post("/posts", draft).await?;
        debug!("[JsonPlaceholderClient] Created post id={}", post.id);
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> ApiResult<Post> {
        self.http.put(&format!("/posts/{}", post.id), post).await
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.http.delete(&format!("/posts/{}", id)).await?;
        debug!("[JsonPlaceholderClient] Deleted post id={}", id);
        Ok(())
    }

    async fn list_post_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        self.http.get(&format!("/posts/{}/comments", post_id)).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.http.get("/users").await
    }

    async fn list_user_todos(&self, user_id: UserId) -> ApiResult<Vec<Todo>> {
        self.http.get(&format!("/users/{}/todos", user_id)).await
    }

    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> ApiResult<Todo> {
        let body = json!({ "completed": completed });
        self.http.patch(&format!("/todos/{}", id), &body).await
    }

    async fn list_user_albums(&self, user_id: UserId) -> ApiResult<Vec<Album>> {
        self.http.get(&format!("/users/{}/albums", user_id)).await
    }

    async fn list_album_photos(&self, album_id: AlbumId) -> ApiResult<Vec<Photo>> {
        self.http.get(&format!("/albums/{}/photos", album_id)).await
    }
}
