use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::dtos::user::{UserSummary, UsersResponse};

/// Lists every user with their subscription, for the admin dashboard.
///
/// # Output
/// - Success: `{"users": [{"id", "email", "displayName", "role", "subscription"}]}`,
///   ordered by display name; `subscription` is `null` for users who never subscribed
#[get("")]
async fn get_users(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let users = db::user::get_users(pg_pool).await?;
    Success::ok(UsersResponse {
        users: users.into_iter().map(UserSummary::from).collect(),
    })
}
