//! In-memory stand-in for the JSONPlaceholder API
//!
//! FakeRestApi implements RestApi over a local dataset:
//! - Writes are persisted in memory (the public demo server only pretends to)
//! - Failures can be injected per route, latency can be added per route
//! - Every call is counted so tests can assert on remote traffic
//!
//! Used by the dashboard's tests and by the console's offline mode.

use async_trait::async_trait;
use dashboard_api::{
    Album, AlbumId, ApiError, ApiResult, Comment, Photo, Post, PostDraft, PostId, Todo, TodoId,
    User, UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::api::RestApi;

/// One remote endpoint, parameterised by the id in its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    ListPosts,
    UserPosts(UserId),
    CreatePost,
    UpdatePost(PostId),
    DeletePost(PostId),
    PostComments(PostId),
    ListUsers,
    UserTodos(UserId),
    PatchTodo(TodoId),
    UserAlbums(UserId),
    AlbumPhotos(AlbumId),
}

impl Route {
    fn path(&self) -> String {
        match self {
            Route::ListPosts | Route::CreatePost => "/posts".to_string(),
            Route::UserPosts(id) => format!("/users/{}/posts", id),
            Route::UpdatePost(id) | Route::DeletePost(id) => format!("/posts/{}", id),
            Route::PostComments(id) => format!("/posts/{}/comments", id),
            Route::ListUsers => "/users".to_string(),
            Route::UserTodos(id) => format!("/users/{}/todos", id),
            Route::PatchTodo(id) => format!("/todos/{}", id),
            Route::UserAlbums(id) => format!("/users/{}/albums", id),
            Route::AlbumPhotos(id) => format!("/albums/{}/photos", id),
        }
    }

    fn not_found(&self) -> ApiError {
        ApiError::Status {
            status: 404,
            url: format!("fake://{}", self.path()),
            body: "{}".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Dataset {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    todos: Vec<Todo>,
    albums: Vec<Album>,
    photos: Vec<Photo>,
}

#[derive(Default)]
pub struct FakeRestApi {
    data: Mutex<Dataset>,
    failures: Mutex<HashMap<Route, ApiError>>,
    delays: Mutex<HashMap<Route, Duration>>,
    calls: Mutex<HashMap<Route, usize>>,
}

impl FakeRestApi {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A small deterministic dataset: 3 users, 4 posts each with 2 comments,
    /// 3 todos per user and 2 albums of 3 photos per user.
    pub fn seeded() -> Self {
        let fake = Self::empty();
        {
            let mut data = fake.lock_data();
            let names = [
                ("Leanne Graham", "Bret", "Sincere@april.biz"),
                ("Ervin Howell", "Antonette", "Shanna@melissa.tv"),
                ("Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
            ];
            let mut post_id = 1;
            let mut comment_id = 1;
            let mut todo_id = 1;
            let mut album_id = 1;
            let mut photo_id = 1;

            for (index, (name, username, email)) in names.iter().enumerate() {
                let user_id = index as UserId + 1;
                data.users.push(User::new(user_id, *name, *username, *email));

                for n in 1..=4 {
                    data.posts.push(Post {
                        id: post_id,
                        user_id,
                        title: format!("{} post {}", username, n),
                        body: format!("Body of post {} written by {}.", n, name),
                    });
                    for c in 1..=2 {
                        data.comments.push(Comment {
                            id: comment_id,
                            post_id,
                            name: format!("comment {} on post {}", c, post_id),
                            email: format!("reader{}@example.com", comment_id),
                            body: "Nice post.".to_string(),
                        });
                        comment_id += 1;
                    }
                    post_id += 1;
                }

                for n in 1..=3 {
                    data.todos.push(Todo {
                        id: todo_id,
                        user_id,
                        title: format!("{} todo {}", username, n),
                        completed: n % 2 == 0,
                    });
                    todo_id += 1;
                }

                for n in 1..=2 {
                    data.albums.push(Album {
                        id: album_id,
                        user_id,
                        title: format!("{} album {}", username, n),
                    });
                    for _ in 0..3 {
                        data.photos.push(Photo {
                            album_id,
                            id: photo_id,
                            title: format!("photo {}", photo_id),
                            url: format!("https://via.placeholder.com/600/{:06x}", photo_id),
                            thumbnail_url: format!(
                                "https://via.placeholder.com/150/{:06x}",
                                photo_id
                            ),
                        });
                        photo_id += 1;
                    }
                    album_id += 1;
                }
            }
        }
        fake
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock_data().users = users;
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.lock_data().posts = posts;
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        self.lock_data().comments = comments;
        self
    }

    pub fn with_todos(self, todos: Vec<Todo>) -> Self {
        self.lock_data().todos = todos;
        self
    }

    pub fn with_albums(self, albums: Vec<Album>, photos: Vec<Photo>) -> Self {
        {
            let mut data = self.lock_data();
            data.albums = albums;
            data.photos = photos;
        }
        self
    }

    /// Make every call to `route` fail with `error` until cleared
    pub fn fail(&self, route: Route, error: ApiError) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(route, error);
    }

    pub fn clear_failure(&self, route: Route) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&route);
    }

    /// Delay every call to `route` by `delay` before it resolves
    pub fn delay(&self, route: Route, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(route, delay);
    }

    /// Number of calls made to `route` so far, failed ones included
    pub fn calls(&self, route: Route) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&route)
            .copied()
            .unwrap_or(0)
    }

    /// Current server-side posts, for assertions
    pub fn posts(&self) -> Vec<Post> {
        self.lock_data().posts.clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.lock_data().todos.clone()
    }

    fn lock_data(&self) -> std::sync::MutexGuard<'_, Dataset> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count the call, apply latency, then surface an injected failure if any
    async fn enter(&self, route: Route) -> ApiResult<()> {
        *self
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(route)
            .or_insert(0) += 1;

        let delay = self
            .delays
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&route)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&route)
            .cloned();
        match failure {
            Some(err) => {
                debug!("[FakeRestApi] Injected failure for {}: {}", route.path(), err);
                Err(err)
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RestApi for FakeRestApi {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.enter(Route::ListPosts).await?;
        Ok(self.lock_data().posts.clone())
    }

    async fn list_user_posts(&self, user_id: UserId) -> ApiResult<Vec<Post>> {
        self.enter(Route::UserPosts(user_id)).await?;
        Ok(self
            .lock_data()
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post> {
        self.enter(Route::CreatePost).await?;
        let mut data = self.lock_data();
        let id = data.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let post = draft.clone().into_post(id);
        data.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> ApiResult<Post> {
        let route = Route::UpdatePost(post.id);
        self.enter(route).await?;
        let mut data = self.lock_data();
        let existing = data
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| route.not_found())?;
        *existing = post.clone();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        let route = Route::DeletePost(id);
        self.enter(route).await?;
        let mut data = self.lock_data();
        let before = data.posts.len();
        data.posts.retain(|p| p.id != id);
        if data.posts.len() == before {
            return Err(route.not_found());
        }
        Ok(())
    }

    async fn list_post_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        self.enter(Route::PostComments(post_id)).await?;
        Ok(self
            .lock_data()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.enter(Route::ListUsers).await?;
        Ok(self.lock_data().users.clone())
    }

    async fn list_user_todos(&self, user_id: UserId) -> ApiResult<Vec<Todo>> {
        self.enter(Route::UserTodos(user_id)).await?;
        Ok(self
            .lock_data()
            .todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> ApiResult<Todo> {
        let route = Route::PatchTodo(id);
        self.enter(route).await?;
        let mut data = self.lock_data();
        let todo = data
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| route.not_found())?;
        todo.completed = completed;
        Ok(todo.clone())
    }

    async fn list_user_albums(&self, user_id: UserId) -> ApiResult<Vec<Album>> {
        self.enter(Route::UserAlbums(user_id)).await?;
        Ok(self
            .lock_data()
            .albums
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_album_photos(&self, album_id: AlbumId) -> ApiResult<Vec<Photo>> {
        self.enter(Route::AlbumPhotos(album_id)).await?;
        Ok(self
            .lock_data()
            .photos
            .iter()
            .filter(|p| p.album_id == album_id)
            .cloned()
            .collect())
    }
}
