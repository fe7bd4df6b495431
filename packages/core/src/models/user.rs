//! User Models

use serde::{Deserialize, Serialize};

use super::wire;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Employee,
    Client,
}

/// User as exchanged with `/api/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// Body for `POST /api/users`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}
