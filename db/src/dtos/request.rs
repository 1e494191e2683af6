use chrono::{DateTime, Utc};

use crate::models::request::RequestStatus;

pub struct DesignRequestCreateRequest {
    pub client_id: String,
    pub brief: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct DesignRequestFilter {
    pub client_id: Option<String>,
    pub status: Option<RequestStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
