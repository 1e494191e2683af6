use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error::Res;

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}

/// Plain text responses, used where the caller is a machine that only
/// inspects the status code (payment provider webhooks).
pub struct PlainText;
impl PlainText {
    pub fn ok(body: &'static str) -> HttpResponse {
        HttpResponse::Ok().content_type("text/plain").body(body)
    }
    pub fn bad_request(body: &'static str) -> HttpResponse {
        HttpResponse::BadRequest().content_type("text/plain").body(body)
    }
    pub fn internal_error(body: &'static str) -> HttpResponse {
        HttpResponse::InternalServerError()
            .content_type("text/plain")
            .body(body)
    }
}
