//! JSONPlaceholder integration for the posts dashboard
//!
//! - `http` - HttpClient (base URL + GET/POST/PUT/PATCH/DELETE, JSON in and out)
//! - `api` - RestApi, the seam between dispatchers and the remote service
//! - `client` - JsonPlaceholderClient, RestApi over HttpClient
//! - `fake` - FakeRestApi, in-memory RestApi for tests and offline mode

pub mod api;
pub mod client;
pub mod fake;
pub mod http;

pub use api::RestApi;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, JsonPlaceholderClient};
pub use fake::{FakeRestApi, Route};
pub use http::HttpClient;
