use async_trait::async_trait;
use dashboard_api::{
    Album, AlbumId, ApiResult, Comment, Photo, Post, PostDraft, PostId, Todo, TodoId, User, UserId,
};

/// The remote REST resources the dashboard consumes.
///
/// Implemented by [`crate::JsonPlaceholderClient`] for the real service and by
/// [`crate::FakeRestApi`] for tests and offline mode.
#[async_trait]
pub trait RestApi: Send + Sync {
    /// `GET /posts`
    async fn list_posts(&self) -> ApiResult<Vec<Post>>;

    /// `GET /users/{id}/posts`
    async fn list_user_posts(&self, user_id: UserId) -> ApiResult<Vec<Post>>;

    /// `POST /posts`
    async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post>;

    /// `PUT /posts/{id}`
    async fn update_post(&self, post: &Post) -> ApiResult<Post>;

    /// `DELETE /posts/{id}`
    async fn delete_post(&self, id: PostId) -> ApiResult<()>;

    /// `GET /posts/{id}/comments`
    async fn list_post_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>>;

    /// `GET /users`
    async fn list_users(&self) -> ApiResult<Vec<User>>;

    /// `GET /users/{id}/todos`
    async fn list_user_todos(&self, user_id: UserId) -> ApiResult<Vec<Todo>>;

    /// `PATCH /todos/{id}` with `{completed}`
    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> ApiResult<Todo>;

    /// `GET /users/{id}/albums`
    async fn list_user_albums(&self, user_id: UserId) -> ApiResult<Vec<Album>>;

    /// `GET /albums/{id}/photos`
    async fn list_album_photos(&self, album_id: AlbumId) -> ApiResult<Vec<Photo>>;
}
