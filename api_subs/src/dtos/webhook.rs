use actix_web::http::header::HeaderMap;
use common::error::Res;
use serde::{Deserialize, Serialize};
use serde_json::{Value, value::RawValue};

/// The signature headers PayPal attaches to every webhook delivery.
/// Absent headers stay `None` and are left out of the verification body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransmissionHeaders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_algo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_sig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_time: Option<String>,
}

impl TransmissionHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        TransmissionHeaders {
            auth_algo: get("paypal-auth-algo"),
            cert_url: get("paypal-cert-url"),
            transmission_id: get("paypal-transmission-id"),
            transmission_sig: get("paypal-transmission-sig"),
            transmission_time: get("paypal-transmission-time"),
        }
    }
}

/// A delivered event: the exact bytes PayPal signed, and the parsed form the
/// pipeline reads fields from.
#[derive(Debug)]
pub struct WebhookEvent {
    raw: Box<RawValue>,
    value: Value,
}

impl WebhookEvent {
    pub fn parse(body: &[u8]) -> Res<Self> {
        let raw: Box<RawValue> = serde_json::from_slice(body)?;
        let value = serde_json::from_str(raw.get())?;
        Ok(Self { raw, value })
    }

    /// The event as delivered. PayPal checks its signature against these
    /// bytes, so they are forwarded untouched.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Body of the verify-webhook-signature call.
#[derive(Debug, Serialize)]
pub struct VerifyWebhookRequest<'a> {
    #[serde(flatten)]
    pub headers: &'a TransmissionHeaders,
    pub webhook_id: &'a str,
    pub webhook_event: &'a RawValue,
}

#[derive(Debug, Deserialize)]
pub struct VerifyWebhookResponse {
    pub verification_status: Option<String>,
}
