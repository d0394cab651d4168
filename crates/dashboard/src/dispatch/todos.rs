use dashboard_api::{ApiResult, Todo, TodoId, UserId};
use tracing::info;

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::TodosAction;

impl Dispatcher {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_todos(&self, user_id: UserId) -> ApiResult<Vec<Todo>> {
        let ticket = self.store.next_ticket();
        self.store.dispatch(TodosAction::FetchStarted { ticket });

        match self.api.list_user_todos(user_id).await {
            Ok(todos) => {
                let count = todos.len();
                if self.store.dispatch(TodosAction::FetchSucceeded {
                    ticket,
                    todos: todos.clone(),
                }) {
                    self.publish(DomainEvent::TodosLoaded { user_id, count });
                } else {
                    self.stale(Operation::LoadTodos);
                }
                Ok(todos)
            }
            Err(err) => {
                if self.store.dispatch(TodosAction::FetchFailed {
                    ticket,
                    error: err.to_string(),
                }) {
                    self.report_failure(Operation::LoadTodos, &err);
                } else {
                    self.stale(Operation::LoadTodos);
                }
                Err(err)
            }
        }
    }

    /// PATCH the completed flag; the server's record then replaces the local one
    #[tracing::instrument(skip(self))]
    pub async fn toggle_todo(&self, id: TodoId, completed: bool) -> ApiResult<Todo> {
        let session = self.active_user_id();
        self.store.dispatch(TodosAction::ToggleStarted { id });

        let result = self.api.set_todo_completed(id, completed).await;
        if !self.session_unchanged(session, Operation::ToggleTodo) {
            return result;
        }

        match result {
            Ok(todo) => {
                info!("[Dispatcher] Todo {} completed={}", todo.id, todo.completed);
                self.store.dispatch(TodosAction::ToggleSucceeded(todo.clone()));
                self.publish(DomainEvent::TodoToggled { todo: todo.clone() });
                Ok(todo)
            }
            Err(err) => {
                self.store.dispatch(TodosAction::ToggleFailed {
                    id,
                    error: err.to_string(),
                });
                self.report_failure(Operation::ToggleTodo, &err);
                Err(err)
            }
        }
    }
}
