use db::models::request::{DesignRequest, RequestStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DesignRequestCreateBody {
    pub client_id: String,
    pub brief: String,
}

#[derive(Debug, Deserialize)]
pub struct DesignRequestsQuery {
    pub client_id: Option<String>,
    pub status: Option<RequestStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DesignRequestsResponse {
    pub requests: Vec<DesignRequest>,
}
