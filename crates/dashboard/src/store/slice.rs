use serde::Serialize;

/// Monotonic id handed to every remote fetch. Completion actions carrying a
/// ticket other than the slice's latest are stale and get dropped.
pub type RequestTicket = u64;

/// Lifecycle of the request backing a slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl SliceStatus {
    pub fn is_loading(self) -> bool {
        self == SliceStatus::Loading
    }

    pub fn is_settled(self) -> bool {
        matches!(self, SliceStatus::Succeeded | SliceStatus::Failed)
    }
}

impl std::fmt::Display for SliceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SliceStatus::Idle => "idle",
            SliceStatus::Loading => "loading",
            SliceStatus::Succeeded => "succeeded",
            SliceStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

pub(crate) fn is_current(latest: Option<RequestTicket>, ticket: RequestTicket) -> bool {
    latest == Some(ticket)
}
