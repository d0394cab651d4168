use crate::config::ConfigError;
use crate::validation::ValidationError;
use dashboard_api::ApiError;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Everything that can go wrong above a single remote call
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No active user")]
    NotAuthenticated,

    #[error("Post {0} is not loaded")]
    UnknownPost(dashboard_api::PostId),

    #[error("Todo {0} is not loaded")]
    UnknownTodo(dashboard_api::TodoId),

    #[error("Todo {0} is already being updated")]
    TodoPending(dashboard_api::TodoId),
}
