use std::fmt;

use chrono::{DateTime, Utc};
use common::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
        }
    }

    /// Open requests count against the subscription quota.
    pub fn is_open(&self) -> bool {
        !matches!(self, RequestStatus::Completed)
    }

    /// Column values of every open status.
    pub fn open_statuses() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|status| status.is_open())
            .map(RequestStatus::as_str)
            .collect()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(AppError::BadRequest(format!(
                "Unknown request status: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A commissioned piece of design work.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub id: Uuid,
    pub client_id: String,
    pub brief: String,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_column_text() {
        for status in RequestStatus::ALL {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_bad_request() {
        assert!(matches!(
            "draft".parse::<RequestStatus>(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn only_completed_requests_are_closed() {
        assert!(RequestStatus::Pending.is_open());
        assert!(RequestStatus::InProgress.is_open());
        assert!(!RequestStatus::Completed.is_open());
        assert_eq!(RequestStatus::open_statuses(), ["pending", "in_progress"]);
    }
}
