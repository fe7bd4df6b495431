//! REST Client
//!
//! One method per backend endpoint, thin wrappers over four JSON helpers.
//! Mutating calls that the dashboard never reads a body from (`PUT`,
//! `DELETE`) only check the status, so a backend that answers `204 No
//! Content` works the same as one that echoes the entity.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::models::{
    CreateResourceGroup, CreateResourceItem, NewProject, NewReservation, NewSchedule, NewTask,
    NewUser, Project, Reservation, ResourceGroupRecord, ResourceItemRecord, Schedule, Task,
    UpdateResourceName, User,
};

use super::ApiError;

/// Client for the Orkestria REST backend
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Shorthand used by tests and tools that point at an ad-hoc address.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&ApiConfig::with_base_url(base_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            debug!(path, status = status.as_u16(), "backend request ok");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), body = %body, "backend request failed");
        Err(ApiError::status(status.as_u16(), body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn put_json<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::check(path, response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.url(path)).send().await?;
        Self::check(path, response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/api/projects").await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.post_json("/api/projects", project).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get_json(&format!("/api/projects/{id}")).await
    }

    pub async fn update_project(&self, project: &Project) -> Result<(), ApiError> {
        self.put_json(&format!("/api/projects/{}", project.id), project)
            .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/projects/{id}")).await
    }

    // ------------------------------------------------------------------
    // Tasks (project-scoped and flat)
    // ------------------------------------------------------------------

    pub async fn list_project_tasks(&self, project_id: &str) -> Result<Vec<Task>, ApiError> {
        self.get_json(&format!("/api/projects/{project_id}/tasks"))
            .await
    }

    pub async fn create_project_task(
        &self,
        project_id: &str,
        task: &NewTask,
    ) -> Result<Task, ApiError> {
        self.post_json(&format!("/api/projects/{project_id}/tasks"), task)
            .await
    }

    /// `PUT /api/projects/{id}/tasks/{taskId}`: the full task object is
    /// sent, not a patch; this is what the kanban board uses to persist a
    /// status change.
    pub async fn update_project_task(&self, project_id: &str, task: &Task) -> Result<(), ApiError> {
        self.put_json(
            &format!("/api/projects/{project_id}/tasks/{}", task.id),
            task,
        )
        .await
    }

    pub async fn delete_project_task(
        &self,
        project_id: &str,
        task_id: &str,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/api/projects/{project_id}/tasks/{task_id}"))
            .await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get_json("/api/tasks").await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.post_json("/api/tasks", task).await
    }

    pub async fn update_task(&self, task: &Task) -> Result<(), ApiError> {
        self.put_json(&format!("/api/tasks/{}", task.id), task).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/tasks/{id}")).await
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/users").await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post_json("/api/users", user).await
    }

    pub async fn update_user(&self, user: &User) -> Result<(), ApiError> {
        self.put_json(&format!("/api/users/{}", user.id), user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/users/{id}")).await
    }

    // ------------------------------------------------------------------
    // Resource groups and items
    // ------------------------------------------------------------------

    pub async fn list_resource_groups(&self) -> Result<Vec<ResourceGroupRecord>, ApiError> {
        self.get_json("/api/resource-groups").await
    }

    pub async fn create_resource_group(
        &self,
        group: &CreateResourceGroup,
    ) -> Result<ResourceGroupRecord, ApiError> {
        self.post_json("/api/resource-groups", group).await
    }

    pub async fn update_resource_group(
        &self,
        id: &str,
        update: &UpdateResourceName,
    ) -> Result<(), ApiError> {
        self.put_json(&format!("/api/resource-groups/{id}"), update)
            .await
    }

    pub async fn delete_resource_group(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/resource-groups/{id}")).await
    }

    pub async fn list_resource_items(&self) -> Result<Vec<ResourceItemRecord>, ApiError> {
        self.get_json("/api/resource-items").await
    }

    pub async fn create_resource_item(
        &self,
        item: &CreateResourceItem,
    ) -> Result<ResourceItemRecord, ApiError> {
        self.post_json("/api/resource-items", item).await
    }

    pub async fn update_resource_item(
        &self,
        id: &str,
        update: &UpdateResourceName,
    ) -> Result<(), ApiError> {
        self.put_json(&format!("/api/resource-items/{id}"), update)
            .await
    }

    pub async fn delete_resource_item(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/resource-items/{id}")).await
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        self.get_json("/api/reservations").await
    }

    pub async fn list_group_reservations(
        &self,
        group_id: &str,
    ) -> Result<Vec<Reservation>, ApiError> {
        self.get_json(&format!("/api/resource-groups/{group_id}/reservations"))
            .await
    }

    pub async fn create_reservation(
        &self,
        group_id: &str,
        reservation: &NewReservation,
    ) -> Result<Reservation, ApiError> {
        self.post_json(
            &format!("/api/resource-groups/{group_id}/reservations"),
            reservation,
        )
        .await
    }

    pub async fn update_reservation(&self, reservation: &Reservation) -> Result<(), ApiError> {
        self.put_json(&format!("/api/reservations/{}", reservation.id), reservation)
            .await
    }

    pub async fn delete_reservation(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/reservations/{id}")).await
    }

    // ------------------------------------------------------------------
    // Employee schedules
    // ------------------------------------------------------------------

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        self.get_json("/api/employee-schedules").await
    }

    pub async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Schedule, ApiError> {
        self.post_json("/api/employee-schedules", schedule).await
    }

    pub async fn update_schedule(&self, schedule: &Schedule) -> Result<(), ApiError> {
        self.put_json(&format!("/api/employee-schedules/{}", schedule.id), schedule)
            .await
    }

    pub async fn delete_schedule(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/employee-schedules/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;

    async fn spawn_stub(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn list_resource_groups_parses_loose_payloads() {
        let router = Router::new().route(
            "/api/resource-groups",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "Edificio"},
                    {"id": 2, "name": "Sala A", "parentId": 1, "isReservable": true}
                ]))
            }),
        );
        let addr = spawn_stub(router).await;
        let client = ApiClient::with_base_url(format!("http://{addr}"));

        let groups = client.list_resource_groups().await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].id, "2");
        assert_eq!(groups[1].parent_id, Some("1".to_string()));
    }

    #[tokio::test]
    async fn non_2xx_is_a_uniform_status_error() {
        let router = Router::new().route(
            "/api/resource-groups",
            get(|| async { (StatusCode::NOT_FOUND, "no such thing") }),
        );
        let addr = spawn_stub(router).await;
        let client = ApiClient::with_base_url(format!("http://{addr}"));

        let error = client.list_resource_groups().await.unwrap_err();

        match error {
            ApiError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such thing");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Nothing listens on this port.
        let client = ApiClient::with_base_url("http://127.0.0.1:1");
        let error = client.list_projects().await.unwrap_err();
        assert!(matches!(error, ApiError::Transport(_)));
        assert!(!error.is_http_failure());
    }
}
