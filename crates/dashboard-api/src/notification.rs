use serde::{Deserialize, Serialize};

pub type NotificationId = String;

/// Auto-hide duration used when a request does not specify one
pub const DEFAULT_AUTO_HIDE_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

/// What a producer asks to be shown. The notification center assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
    /// Milliseconds; `None` falls back to [`DEFAULT_AUTO_HIDE_MS`], `Some(0)` disables auto-hide
    pub auto_hide_duration: Option<u64>,
}

impl NotificationRequest {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            auto_hide_duration: None,
        }
    }

    pub fn with_auto_hide(mut self, millis: u64) -> Self {
        self.auto_hide_duration = Some(millis);
        self
    }
}

/// A queued notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// `false` once dismissed or expired; removal follows after the exit delay
    pub open: bool,
    pub auto_hide_duration: u64,
}

impl Notification {
    pub fn from_request(id: NotificationId, request: NotificationRequest) -> Self {
        Self {
            id,
            message: request.message,
            severity: request.severity,
            open: true,
            auto_hide_duration: request.auto_hide_duration.unwrap_or(DEFAULT_AUTO_HIDE_MS),
        }
    }
}
