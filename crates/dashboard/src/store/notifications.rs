use dashboard_api::{Notification, NotificationId};

/// Notifications in creation order. Closed entries stay until removed so the
/// view can play its exit transition.
#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
}

impl NotificationsState {
    pub fn open(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|n| n.open)
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum NotificationsAction {
    Show(Notification),
    /// Close one notification; `None` closes the first in the queue
    Hide(Option<NotificationId>),
    /// Drop one notification; `None` drops the first in the queue
    Remove(Option<NotificationId>),
    ClearAll,
}

pub fn reduce(state: &mut NotificationsState, action: &NotificationsAction) -> bool {
    match action {
        NotificationsAction::Show(notification) => {
            if state.get(&notification.id).is_some() {
                return false;
            }
            state.items.push(notification.clone());
            true
        }
        NotificationsAction::Hide(Some(id)) => {
            match state.items.iter_mut().find(|n| &n.id == id) {
                Some(notification) if notification.open => {
                    notification.open = false;
                    true
                }
                _ => false,
            }
        }
        NotificationsAction::Hide(None) => match state.items.first_mut() {
            Some(first) if first.open => {
                first.open = false;
                true
            }
            _ => false,
        },
        NotificationsAction::Remove(Some(id)) => {
            let before = state.items.len();
            state.items.retain(|n| &n.id != id);
            state.items.len() != before
        }
        NotificationsAction::Remove(None) => {
            if state.items.is_empty() {
                false
            } else {
                state.items.remove(0);
                true
            }
        }
        NotificationsAction::ClearAll => {
            let had_items = !state.items.is_empty();
            state.items.clear();
            had_items
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_api::{NotificationRequest, Severity};

    fn note(id: &str) -> Notification {
        Notification::from_request(
            id.to_string(),
            NotificationRequest::new(Severity::Info, format!("message {}", id)),
        )
    }

    #[test]
    fn show_keeps_creation_order_and_rejects_duplicates() {
        let mut state = NotificationsState::default();
        assert!(reduce(&mut state, &NotificationsAction::Show(note("a"))));
        assert!(reduce(&mut state, &NotificationsAction::Show(note("b"))));
        assert!(!reduce(&mut state, &NotificationsAction::Show(note("a"))));

        let ids: Vec<&str> = state.items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(state.items[0].auto_hide_duration, 4000);
    }

    #[test]
    fn hide_then_remove_by_id() {
        let mut state = NotificationsState::default();
        reduce(&mut state, &NotificationsAction::Show(note("a")));
        reduce(&mut state, &NotificationsAction::Show(note("b")));

        reduce(&mut state, &NotificationsAction::Hide(Some("b".to_string())));
        assert_eq!(state.open().count(), 1);
        assert!(!state.get("b").unwrap().open);

        reduce(&mut state, &NotificationsAction::Remove(Some("b".to_string())));
        assert!(state.get("b").is_none());
        assert!(state.get("a").unwrap().open);
    }

    #[test]
    fn missing_id_falls_back_to_first() {
        let mut state = NotificationsState::default();
        reduce(&mut state, &NotificationsAction::Show(note("a")));
        reduce(&mut state, &NotificationsAction::Show(note("b")));

        reduce(&mut state, &NotificationsAction::Hide(None));
        assert!(!state.items[0].open);
        reduce(&mut state, &NotificationsAction::Remove(None));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "b");

        assert!(reduce(&mut state, &NotificationsAction::ClearAll));
        assert!(!reduce(&mut state, &NotificationsAction::Remove(None)));
    }
}
