use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::request::{DesignRequestCreateRequest, DesignRequestFilter},
    models::request::{DesignRequest, RequestStatus},
};

pub async fn insert_request<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: DesignRequestCreateRequest,
) -> Res<DesignRequest> {
    sqlx::query_as::<_, DesignRequest>(
        r#"
        INSERT INTO design_requests (client_id, brief, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING *
        "#,
    )
    .bind(&data.client_id)
    .bind(&data.brief)
    .bind(data.status.as_str())
    .bind(data.created_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_request_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    request_id: Uuid,
) -> Res<Option<DesignRequest>> {
    sqlx::query_as::<_, DesignRequest>("SELECT * FROM design_requests WHERE id = $1")
        .bind(request_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Newest first. Requests created in the same instant keep a stable order
/// across pages.
pub async fn get_requests<'e, E>(executor: E, filter: DesignRequestFilter) -> Res<Vec<DesignRequest>>
where
    E: Executor<'e, Database = Postgres>,
{
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM design_requests");
    let mut conditions_added = false;

    let mut add_condition_separator = |qb: &mut QueryBuilder<Postgres>| {
        if !conditions_added {
            qb.push(" WHERE ");
            conditions_added = true;
        } else {
            qb.push(" AND ");
        }
    };

    if let Some(client_id) = filter.client_id {
        add_condition_separator(&mut qb);
        qb.push("client_id = ").push_bind(client_id);
    }

    if let Some(status) = filter.status {
        add_condition_separator(&mut qb);
        qb.push("status = ").push_bind(status.as_str());
    }

    qb.push(" ORDER BY created_at DESC, id DESC");

    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    if let Some(offset) = filter.offset {
        qb.push(" OFFSET ").push_bind(offset);
    }

    qb.build_query_as::<DesignRequest>()
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

/// Number of open requests of one client (see `RequestStatus::is_open`).
pub async fn count_open_requests<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    client_id: &str,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM design_requests WHERE client_id = $1 AND status = ANY($2)",
    )
    .bind(client_id)
    .bind(RequestStatus::open_statuses())
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_request_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    request_id: Uuid,
    status: RequestStatus,
) -> Res<Option<DesignRequest>> {
    sqlx::query_as::<_, DesignRequest>(
        r#"
        UPDATE design_requests
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(request_id)
    .bind(status.as_str())
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_all_requests<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<u64> {
    sqlx::query("DELETE FROM design_requests")
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}
