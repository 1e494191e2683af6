use common::error::{AppError, Res};
use db::models::message::ChatMessage;
use sqlx::PgPool;
use uuid::Uuid;

pub fn normalize_text(text: &str) -> Res<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }
    Ok(text.to_string())
}

/// Appends a message to the conversation of a request.
pub async fn post_message(
    pool: &PgPool,
    request_id: Uuid,
    sender_id: &str,
    text: &str,
) -> Res<ChatMessage> {
    let text = normalize_text(text)?;
    let mut tx = pool.begin().await?;

    db::request::get_request_by_id(&mut *tx, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {}", request_id)))?;
    db::user::get_user_by_id(&mut *tx, sender_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", sender_id)))?;

    let message = db::message::insert_message(&mut *tx, request_id, sender_id, &text).await?;
    tx.commit().await?;

    log::debug!("Message {} on request {} from {}", message.id, request_id, sender_id);
    Ok(message)
}

pub async fn list_messages(pool: &PgPool, request_id: Uuid) -> Res<Vec<ChatMessage>> {
    db::request::get_request_by_id(pool, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {}", request_id)))?;
    db::message::get_messages(pool, request_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed_and_required() {
        assert_eq!(normalize_text("  Looks great!\n").unwrap(), "Looks great!");
        assert!(matches!(normalize_text(""), Err(AppError::BadRequest(_))));
        assert!(matches!(normalize_text(" \t "), Err(AppError::BadRequest(_))));
    }
}
