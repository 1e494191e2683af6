use std::sync::Arc;

use actix_web::{Responder, get, patch, post, web};
use common::{error::Res, http::Success};
use db::dtos::request::DesignRequestFilter;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::request::{
        DesignRequestCreateBody, DesignRequestsQuery, DesignRequestsResponse, UpdateStatusBody,
    },
    services,
};

/// Opens a design request for a client.
///
/// # Input
/// - `client_id`: id of the requesting user
/// - `brief`: what should be designed
///
/// # Output
/// - Success: 201 with the new request, status `pending`
/// - Error: 400 for an empty brief, 404 for an unknown client,
///   403 without an active subscription or once the plan's open-request quota is used up
#[post("")]
async fn post_request(
    body: web::Json<DesignRequestCreateBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let request = services::request::create_request(&pool, &body.client_id, &body.brief).await?;
    Success::created(request)
}

/// Lists design requests, newest first, optionally for one client and/or status.
///
/// # Input
/// - `client_id`, `status`: optional filters
/// - `limit`: page size, at most 200 (also the default)
/// - `offset`: rows to skip, for the pages after the first
///
/// # Output
/// - Success: `{"requests": [...]}`. A full page of 200 means more may follow.
#[get("")]
async fn get_requests(
    query: web::Query<DesignRequestsQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let query = query.into_inner();
    let requests = services::request::list_requests(
        &pool,
        DesignRequestFilter {
            client_id: query.client_id,
            status: query.status,
            limit: query.limit,
            offset: query.offset,
        },
    )
    .await?;
    Success::ok(DesignRequestsResponse { requests })
}

/// Returns one design request.
///
/// # Output
/// - Error: 404 if no request has this id
#[get("/{request_id}")]
async fn get_request(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let request = services::request::get_request(&pool, path.into_inner()).await?;
    Success::ok(request)
}

/// Moves a request to `pending`, `in_progress` or `completed`.
#[patch("/{request_id}/status")]
async fn patch_request_status(
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let request = services::request::update_status(&pool, path.into_inner(), &body.status).await?;
    Success::ok(request)
}
