//! Posts dashboard client core
//!
//! - `store` - application state, actions and pure reducers
//! - `dispatch` - async operations against the remote API
//! - `events` - domain events and the bus that carries them
//! - `notifications` - event-driven notification queue with auto-hide timers
//! - `theme_store` - persisted light/dark preference
//! - `validation`, `selectors` - pure helpers for forms and the posts list
//! - `config` - YAML configuration with environment overrides
//! - `app` - `Dashboard`, the composition root frontends hold on to

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod notifications;
pub mod selectors;
pub mod store;
pub mod theme_store;
pub mod validation;

pub use app::{Dashboard, DashboardBuilder};
pub use config::{ConfigError, DashboardConfig, NotificationConfig};
pub use dispatch::Dispatcher;
pub use error::{DashboardError, Result};
pub use events::{DomainEvent, EventBus, EventHandler, Operation};
pub use notifications::{NotificationCenter, NotificationPolicy, NotificationSubscriber};
pub use selectors::PostSelection;
pub use store::{Action, AppState, SliceStatus, Store, View};
pub use theme_store::{FileThemeStore, MemoryThemeStore, ThemeStore, ThemeStoreError};
pub use validation::{FieldError, ValidationError, validate_post_form};

pub use dashboard_api as api;
