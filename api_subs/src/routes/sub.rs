use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};
use sqlx::PgPool;

use crate::{
    dtos::sub::{PlansResponse, UserSubscriptionResponse},
    services,
};

/// Lists the subscription plans and the number of concurrent design
/// requests each one grants.
///
/// # Output
/// - Success: `{"plans": [{"plan_id": "P-weekly", "name": "Weekly", "requests": 1}, ...]}`
#[get("/plans")]
async fn get_plans(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    Success::ok(PlansResponse {
        plans: services::sub::list_plans(&config.plans),
    })
}

/// Returns the current subscription of a user.
///
/// # Output
/// - Success: `{"subscription": {"plan", "requests", "active", "updatedAt"}}`, or
///   `{"subscription": null}` before the first activation
/// - Error: 404 if the user does not exist
#[get("/{user_id}")]
async fn get_current(
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user_id = path.into_inner();
    let pg_pool: &PgPool = &**pool;
    let user = db::user::get_user_by_id(pg_pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;

    Success::ok(UserSubscriptionResponse {
        subscription: user.subscription(),
    })
}
