//! Schedule and Reservation Models
//!
//! Employee schedules and client reservations share the same calendar view
//! and the same reminder mechanics (see [`crate::notifications`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// Employee schedule entry as exchanged with `/api/employee-schedules`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub username: String,
    pub title: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

/// Body for `POST /api/employee-schedules`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub username: String,
    pub title: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

/// Embedded resource group reference on a reservation
///
/// Reservation payloads embed the group they book rather than a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupRef {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
}

/// Reservation as exchanged with `/api/reservations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub title: String,
    pub resource_group: ResourceGroupRef,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub reserved_by: String,
}

/// Body for `POST /api/resource-groups/{id}/reservations`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub title: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub reserved_by: String,
}
