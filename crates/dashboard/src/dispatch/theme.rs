use dashboard_api::ThemeMode;
use tracing::info;

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::ThemeAction;

impl Dispatcher {
    /// Flip between light and dark and persist the result
    pub fn toggle_theme(&self) -> ThemeMode {
        self.store.dispatch(ThemeAction::Toggle);
        let mode = self.store.select(|state| state.theme.mode);
        self.persist_theme(mode);
        mode
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        if self.store.dispatch(ThemeAction::Set(mode)) {
            self.persist_theme(mode);
        }
    }

    /// A failed write keeps the in-memory mode and raises a warning
    fn persist_theme(&self, mode: ThemeMode) {
        info!("[Dispatcher] Theme is now {}", mode);
        self.publish(DomainEvent::ThemeChanged { mode });
        if let Err(err) = self.theme_store.save(mode) {
            self.report_failure(Operation::PersistTheme, &err);
        }
    }
}
