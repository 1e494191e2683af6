use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::message::ChatMessage;

pub async fn insert_message<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    request_id: Uuid,
    sender_id: &str,
    text: &str,
) -> Res<ChatMessage> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        WITH inserted AS (
            INSERT INTO chat_messages (request_id, sender_id, text, created_at)
            VALUES ($1, $2, $3, clock_timestamp())
            RETURNING *
        )
        SELECT inserted.*, users.display_name AS sender_name
        FROM inserted
        JOIN users ON users.id = inserted.sender_id
        "#,
    )
    .bind(request_id)
    .bind(sender_id)
    .bind(text)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Messages of one request in the order they were sent.
pub async fn get_messages<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    request_id: Uuid,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT chat_messages.*, users.display_name AS sender_name
        FROM chat_messages
        JOIN users ON users.id = chat_messages.sender_id
        WHERE chat_messages.request_id = $1
        ORDER BY chat_messages.created_at, chat_messages.id
        "#,
    )
    .bind(request_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
