//! Kanban Service - Optimistic Task Moves
//!
//! The one place in the dashboard where local state changes before the
//! backend confirms: a dragged card must land instantly. The protocol is
//!
//! 1. move the task between buckets immediately (status rewritten)
//! 2. PUT the full task object with its new status
//! 3. on failure, reverse the exact bucket move and surface the error
//!
//! A drop onto the card's own column is a no-op and never touches the
//! network. No retry is attempted; a second drag is the user's retry.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::kanban::{KanbanBoard, KanbanColumn};
use crate::models::Task;

use super::ServiceError;

/// One project's board plus its sync protocol
pub struct KanbanService {
    client: ApiClient,
    project_id: String,
    board: RwLock<KanbanBoard>,
}

impl KanbanService {
    pub fn new(client: ApiClient, project_id: impl Into<String>, tasks: Vec<Task>) -> Self {
        KanbanService {
            client,
            project_id: project_id.into(),
            board: RwLock::new(KanbanBoard::from_tasks(tasks)),
        }
    }

    /// Current board value for the presentation layer.
    pub async fn board(&self) -> KanbanBoard {
        self.board.read().await.clone()
    }

    /// Move a task between columns, optimistically.
    ///
    /// On success the board already reflects the move and nothing further
    /// happens. On failure the move is reversed exactly and the error is
    /// returned for the caller to surface.
    pub async fn move_task(
        &self,
        task_id: &str,
        from: KanbanColumn,
        to: KanbanColumn,
    ) -> Result<(), ServiceError> {
        if from == to {
            debug!(task = task_id, column = from.title(), "same-column move ignored");
            return Ok(());
        }

        // Optimistic bucket move; the lock is released before the network
        // call so the board stays readable while the request is in flight.
        let original = {
            let mut board = self.board.write().await;
            board
                .apply_move(task_id, from, to)
                .ok_or_else(|| ServiceError::task_not_found(task_id, from.title()))?
        };

        let mut payload = original.clone();
        payload.status = to.status();

        match self.client.update_project_task(&self.project_id, &payload).await {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!(
                    task = task_id,
                    from = from.title(),
                    to = to.title(),
                    "task move rejected by backend, reverting"
                );
                self.board.write().await.revert_move(original, from, to);
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus, TaskType};
    use axum::http::StatusCode;
    use axum::routing::put;
    use axum::{Json, Router};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_stub(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: None,
            priority: TaskPriority::Medium,
            task_type: TaskType::Other,
            status,
            project_id: "p1".to_string(),
            assigned_user: None,
        }
    }

    fn service(addr: SocketAddr, tasks: Vec<Task>) -> KanbanService {
        KanbanService::new(ApiClient::with_base_url(format!("http://{addr}")), "p1", tasks)
    }

    #[tokio::test]
    async fn successful_move_sends_the_full_task_with_new_status() {
        let seen: Arc<std::sync::Mutex<Option<Task>>> = Arc::default();
        let sink = seen.clone();
        let router = Router::new().route(
            "/api/projects/:id/tasks/:task_id",
            put(move |Json(body): Json<Task>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    StatusCode::OK
                }
            }),
        );
        let addr = spawn_stub(router).await;
        let service = service(addr, vec![task("t", TaskStatus::Todo)]);

        service
            .move_task("t", KanbanColumn::Todo, KanbanColumn::Done)
            .await
            .unwrap();

        let board = service.board().await;
        assert!(board.tasks(KanbanColumn::Todo).is_empty());
        assert_eq!(board.tasks(KanbanColumn::Done)[0].status, TaskStatus::Done);

        let sent = seen.lock().unwrap().take().unwrap();
        assert_eq!(sent.id, "t");
        assert_eq!(sent.status, TaskStatus::Done);
        assert_eq!(sent.title, "Task t");
    }

    #[tokio::test]
    async fn failed_move_is_reverted_exactly() {
        let router = Router::new().route(
            "/api/projects/:id/tasks/:task_id",
            put(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_stub(router).await;
        let service = service(addr, vec![task("t", TaskStatus::Todo)]);

        let error = service
            .move_task("t", KanbanColumn::Todo, KanbanColumn::Done)
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::Api(_)));
        let board = service.board().await;
        assert!(board.tasks(KanbanColumn::Done).is_empty());
        let todo = board.tasks(KanbanColumn::Todo);
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn same_column_move_never_touches_the_network() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/projects/:id/tasks/:task_id",
            put(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }
            }),
        );
        let addr = spawn_stub(router).await;
        let service = service(addr, vec![task("t", TaskStatus::Todo)]);

        service
            .move_task("t", KanbanColumn::Todo, KanbanColumn::Todo)
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        let board = service.board().await;
        assert_eq!(board.tasks(KanbanColumn::Todo).len(), 1);
    }

    #[tokio::test]
    async fn moving_a_task_not_in_the_source_column_fails_cleanly() {
        let service = service(
            "127.0.0.1:1".parse().unwrap(),
            vec![task("t", TaskStatus::Todo)],
        );

        let error = service
            .move_task("t", KanbanColumn::Blocked, KanbanColumn::Done)
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::TaskNotFound { .. }));
        // Board untouched.
        let board = service.board().await;
        assert_eq!(board.tasks(KanbanColumn::Todo).len(), 1);
    }
}
