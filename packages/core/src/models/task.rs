//! Task Models
//!
//! Tasks drive the kanban board. The backend is inconsistent about the
//! assignee field (`assignedUser` on some endpoints, `user` on others), so
//! the `Task` type accepts both and always emits `assignedUser`.

use serde::{Deserialize, Serialize};

use super::user::User;
use super::wire;

/// Kanban status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    Doing,
    Blocked,
    Done,
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Urgent,
    Recurring,
    Other,
}

/// Task as exchanged with `/api/tasks` and `/api/projects/{id}/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    #[serde(deserialize_with = "wire::id")]
    pub project_id: String,
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<User>,
}

/// Body for `POST /api/projects/{id}/tasks`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_json(assignee_field: &str) -> String {
        format!(
            r#"{{
                "id": "t1",
                "title": "Cablear sala",
                "priority": "HIGH",
                "type": "URGENT",
                "status": "TODO",
                "projectId": 7,
                "{assignee_field}": {{"id": "u1", "username": "ana", "email": "ana@example.com", "role": "EMPLOYEE"}}
            }}"#
        )
    }

    #[test]
    fn accepts_assigned_user_field() {
        let task: Task = serde_json::from_str(&task_json("assignedUser")).unwrap();
        assert_eq!(task.project_id, "7");
        assert_eq!(task.assigned_user.unwrap().username, "ana");
    }

    #[test]
    fn accepts_legacy_user_field() {
        let task: Task = serde_json::from_str(&task_json("user")).unwrap();
        assert_eq!(task.assigned_user.unwrap().username, "ana");
    }

    #[test]
    fn serializes_normalized_field_names() {
        let task: Task = serde_json::from_str(&task_json("user")).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("assignedUser").is_some());
        assert!(json.get("user").is_none());
        assert_eq!(json["type"], "URGENT");
    }
}
