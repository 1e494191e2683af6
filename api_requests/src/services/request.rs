use chrono::Utc;
use common::error::{AppError, Res};
use db::{
    dtos::request::{DesignRequestCreateRequest, DesignRequestFilter},
    models::{
        request::{DesignRequest, RequestStatus},
        user::Subscription,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

pub const MAX_LIMIT: i64 = 200;

/// Checks that one more open request fits in the subscription's quota.
pub fn check_quota(subscription: Option<&Subscription>, open_requests: i64) -> Res<()> {
    let subscription = match subscription {
        Some(subscription) if subscription.active => subscription,
        _ => {
            return Err(AppError::Forbidden(
                "An active subscription is required to open design requests".to_string(),
            ));
        }
    };
    if open_requests >= i64::from(subscription.requests) {
        return Err(AppError::Forbidden(format!(
            "The {} plan allows {} open request(s) at a time",
            subscription.plan, subscription.requests
        )));
    }
    Ok(())
}

pub fn normalize_brief(brief: &str) -> Res<String> {
    let brief = brief.trim();
    if brief.is_empty() {
        return Err(AppError::BadRequest("Brief must not be empty".to_string()));
    }
    Ok(brief.to_string())
}

/// Opens a new pending request if the client's plan has room for it.
///
/// The client's row stays locked between counting and inserting, so two
/// concurrent creations cannot both take the last slot.
pub async fn create_request(pool: &PgPool, client_id: &str, brief: &str) -> Res<DesignRequest> {
    let brief = normalize_brief(brief)?;
    let mut tx = pool.begin().await?;

    let user = db::user::get_user_for_update(&mut *tx, client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", client_id)))?;
    let open = db::request::count_open_requests(&mut *tx, client_id).await?;
    check_quota(user.subscription().as_ref(), open)?;

    let request = db::request::insert_request(
        &mut *tx,
        DesignRequestCreateRequest {
            client_id: client_id.to_string(),
            brief,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        },
    )
    .await?;
    tx.commit().await?;

    log::info!("Request {} opened for {}", request.id, client_id);
    Ok(request)
}

/// Bounds the page to at most `MAX_LIMIT` rows and a non-negative offset.
pub fn clamp_page(mut filter: DesignRequestFilter) -> DesignRequestFilter {
    filter.limit = Some(filter.limit.unwrap_or(MAX_LIMIT).clamp(1, MAX_LIMIT));
    filter.offset = filter.offset.map(|offset| offset.max(0));
    filter
}

pub async fn list_requests(pool: &PgPool, filter: DesignRequestFilter) -> Res<Vec<DesignRequest>> {
    db::request::get_requests(pool, clamp_page(filter)).await
}

pub async fn get_request(pool: &PgPool, request_id: Uuid) -> Res<DesignRequest> {
    db::request::get_request_by_id(pool, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {}", request_id)))
}

pub async fn update_status(pool: &PgPool, request_id: Uuid, status: &str) -> Res<DesignRequest> {
    let status = status.parse::<RequestStatus>()?;
    let request = db::request::update_request_status(pool, request_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {}", request_id)))?;
    log::info!("Request {} is now {}", request.id, request.status);
    Ok(request)
}
