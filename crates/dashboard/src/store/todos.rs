use dashboard_api::{Todo, TodoId};
use std::collections::HashSet;

use super::slice::{RequestTicket, SliceStatus, is_current};

#[derive(Debug, Clone, Default)]
pub struct TodosState {
    pub todos: Vec<Todo>,
    pub status: SliceStatus,
    /// Status of the most recent completed-flag toggle
    pub toggle_status: SliceStatus,
    pub error: Option<String>,
    /// Todos with a PATCH in flight
    pub pending: HashSet<TodoId>,
    pub latest_ticket: Option<RequestTicket>,
}

impl TodosState {
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

#[derive(Debug, Clone)]
pub enum TodosAction {
    FetchStarted { ticket: RequestTicket },
    FetchSucceeded { ticket: RequestTicket, todos: Vec<Todo> },
    FetchFailed { ticket: RequestTicket, error: String },
    ToggleStarted { id: TodoId },
    /// The server's record replaces the local one with the same id
    ToggleSucceeded(Todo),
    ToggleFailed { id: TodoId, error: String },
    Clear,
}

pub fn reduce(state: &mut TodosState, action: &TodosAction) -> bool {
    match action {
        TodosAction::FetchStarted { ticket } => {
            state.status = SliceStatus::Loading;
            state.error = None;
            state.latest_ticket = Some(*ticket);
            true
        }
        TodosAction::FetchSucceeded { ticket, todos } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Succeeded;
            state.todos = todos.clone();
            true
        }
        TodosAction::FetchFailed { ticket, error } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        TodosAction::ToggleStarted { id } => {
            state.toggle_status = SliceStatus::Loading;
            state.error = None;
            state.pending.insert(*id);
            true
        }
        TodosAction::ToggleSucceeded(todo) => {
            state.toggle_status = SliceStatus::Succeeded;
            state.pending.remove(&todo.id);
            if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo.clone();
            }
            true
        }
        TodosAction::ToggleFailed { id, error } => {
            state.toggle_status = SliceStatus::Failed;
            state.pending.remove(id);
            state.error = Some(error.clone());
            true
        }
        TodosAction::Clear => {
            *state = TodosState::default();
            true
        }
    }
}
