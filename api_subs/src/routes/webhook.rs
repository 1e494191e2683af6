use actix_web::{HttpRequest, HttpResponse, post, web};
use common::{error::AppError, http::PlainText};

use crate::{
    dtos::webhook::{TransmissionHeaders, WebhookEvent},
    services::webhook::{self, WebhookOutcome, WebhookState},
};

/// Handles PayPal subscription webhook events.
///
/// # Input
/// - `payload`: Raw JSON body of the PayPal event
/// - `req`: HTTP request carrying the `paypal-*` transmission headers
/// - `state`: Verifier, subscriber store and plan table
///
/// # Output
/// - `200 Webhook processed`: event verified and applied, or an event type we do not act on
/// - `400 Invalid webhook signature`: PayPal did not answer `SUCCESS` for the delivery
/// - `400 Invalid webhook payload`: body is not JSON, or its plan is refused
/// - `500 Webhook processing failed`: verification call or database write failed
///
/// # Note
/// Called by PayPal, never by the frontend. The caller is not authenticated here;
/// trust comes only from PayPal's verification endpoint. Only
/// `BILLING.SUBSCRIPTION.ACTIVATED` changes state. PayPal retries deliveries
/// answered with a non-2xx status.
#[post("/paypal/webhook")]
async fn post_paypal_webhook(
    payload: web::Bytes,
    req: HttpRequest,
    state: web::Data<WebhookState>,
) -> HttpResponse {
    let event = match WebhookEvent::parse(&payload) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Webhook body is not JSON: {}", e);
            return PlainText::bad_request("Invalid webhook payload");
        }
    };
    let headers = TransmissionHeaders::from_headers(req.headers());

    match webhook::process_webhook(&state, &headers, &event).await {
        Ok(WebhookOutcome::Rejected(_)) => PlainText::bad_request("Invalid webhook signature"),
        Ok(_) => PlainText::ok("Webhook processed"),
        Err(AppError::BadRequest(reason)) => {
            log::warn!("Webhook refused: {}", reason);
            PlainText::bad_request("Invalid webhook payload")
        }
        Err(e) => {
            log::error!("Webhook error: {}", e);
            PlainText::internal_error("Webhook processing failed")
        }
    }
}
