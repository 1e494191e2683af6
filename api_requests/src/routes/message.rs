use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::message::{ChatMessageCreateBody, ChatMessagesResponse},
    services,
};

/// Adds a message to the conversation of a design request.
///
/// # Input
/// - `sender_id`: id of the client or admin writing
/// - `text`: the message, trimmed
///
/// # Output
/// - Success: 201 with the stored message, including `senderName`
/// - Error: 400 for an empty text, 404 for an unknown request or sender
#[post("/{request_id}/messages")]
async fn post_message(
    path: web::Path<Uuid>,
    body: web::Json<ChatMessageCreateBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let message =
        services::message::post_message(&pool, path.into_inner(), &body.sender_id, &body.text)
            .await?;
    Success::created(message)
}

/// The conversation of a design request, oldest message first.
#[get("/{request_id}/messages")]
async fn get_messages(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let messages = services::message::list_messages(&pool, path.into_inner()).await?;
    Success::ok(ChatMessagesResponse { messages })
}
