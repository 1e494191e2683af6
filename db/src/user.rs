use common::{
    error::{AppError, Res},
    plan::PlanEntitlement,
};
use sqlx::{Executor, Postgres};

use crate::{dtos::user::UserCreateRequest, models::user::User};

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Every user, ordered by display name.
pub async fn get_users<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY display_name, id")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

/// Same as `get_user_by_id`, but locks the row until the surrounding
/// transaction ends.
pub async fn get_user_for_update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Sets all subscription columns of one user in a single statement.
/// The timestamp is assigned by the database.
/// Returns `None` when no user has this id.
pub async fn activate_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    plan: &PlanEntitlement,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET subscription_plan = $2,
            subscription_requests = $3,
            subscription_active = TRUE,
            subscription_updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&plan.name)
    .bind(plan.requests)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn upsert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    let subscription = data.subscription.as_ref();
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, display_name, role, subscription_plan, subscription_requests, subscription_active, subscription_updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO UPDATE SET
            email = EXCLUDED.email,
            display_name = EXCLUDED.display_name,
            role = EXCLUDED.role,
            subscription_plan = EXCLUDED.subscription_plan,
            subscription_requests = EXCLUDED.subscription_requests,
            subscription_active = EXCLUDED.subscription_active,
            subscription_updated_at = EXCLUDED.subscription_updated_at
        RETURNING *
        "#,
    )
    .bind(&data.id)
    .bind(&data.email)
    .bind(&data.display_name)
    .bind(&data.role)
    .bind(subscription.map(|s| s.plan.clone()))
    .bind(subscription.map(|s| s.requests))
    .bind(subscription.map(|s| s.active))
    .bind(subscription.map(|s| s.updated_at))
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_all_users<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<u64> {
    sqlx::query("DELETE FROM users")
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}
