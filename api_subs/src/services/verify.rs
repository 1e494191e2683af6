use async_trait::async_trait;
use base64::{Engine, engine::general_purpose};
use common::{env_config::PayPalConfig, error::Res};
use reqwest::{Client, header};
use serde_json::value::RawValue;

use crate::dtos::webhook::{TransmissionHeaders, VerifyWebhookRequest, VerifyWebhookResponse};

/// Outcome of asking the payment provider whether a delivery is authentic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Success,
    /// Anything but an exact `SUCCESS`, including a missing status.
    Rejected(Option<String>),
}

impl Verdict {
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("SUCCESS") => Verdict::Success,
            other => Verdict::Rejected(other.map(str::to_string)),
        }
    }
}

/// Checks the signature of an inbound webhook delivery.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify(&self, headers: &TransmissionHeaders, event: &RawValue) -> Res<Verdict>;
}

/// Delegates verification to PayPal's verify-webhook-signature endpoint.
pub struct PayPalVerifier {
    client: Client,
    config: PayPalConfig,
}

impl PayPalVerifier {
    pub fn new(config: PayPalConfig) -> Res<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.verify_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", general_purpose::STANDARD.encode(credentials))
    }
}

#[async_trait]
impl SignatureVerifier for PayPalVerifier {
    async fn verify(&self, headers: &TransmissionHeaders, event: &RawValue) -> Res<Verdict> {
        let body = VerifyWebhookRequest {
            headers,
            webhook_id: &self.config.webhook_id,
            webhook_event: event,
        };

        let response = self
            .client
            .post(&self.config.verify_url)
            .header(header::AUTHORIZATION, self.authorization())
            .json(&body)
            .send()
            .await?;

        // PayPal answers errors with a JSON body too, so the status code is
        // only logged; a body that is not JSON is a transport failure.
        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed: VerifyWebhookResponse = serde_json::from_slice(&bytes)?;
        log::debug!(
            "Verification of {} answered {} with {:?}",
            headers.transmission_id.as_deref().unwrap_or("<none>"),
            status,
            parsed.verification_status
        );

        Ok(Verdict::from_status(parsed.verification_status.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use common::error::AppError;
    use serde_json::{Value, json};

    use super::*;
    use crate::dtos::webhook::WebhookEvent;

    const CLIENT_ID: &str = "client";
    const CLIENT_SECRET: &str = "secret";
    // base64("client:secret")
    const EXPECTED_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";

    /// Starts a local server standing in for the provider and returns its
    /// verification URL. The handler sees the body exactly as sent.
    fn start_provider(respond: fn(&HttpRequest, &str) -> HttpResponse) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                "/verify",
                web::post().to(move |req: HttpRequest, body: String| async move {
                    respond(&req, &body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}/verify", addr)
    }

    fn verifier(verify_url: String) -> PayPalVerifier {
        PayPalVerifier::new(PayPalConfig {
            webhook_id: "WH-1".to_string(),
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            verify_url,
            verify_timeout: Some(std::time::Duration::from_secs(5)),
        })
        .unwrap()
    }

    fn event(body: &str) -> WebhookEvent {
        WebhookEvent::parse(body.as_bytes()).unwrap()
    }

    fn headers() -> TransmissionHeaders {
        TransmissionHeaders {
            auth_algo: Some("SHA256withRSA".to_string()),
            cert_url: Some("https://api.paypal.com/cert.pem".to_string()),
            transmission_id: Some("tx-1".to_string()),
            transmission_sig: Some("sig".to_string()),
            transmission_time: Some("2025-03-01T10:00:00Z".to_string()),
        }
    }

    #[test]
    fn only_exact_success_is_a_success() {
        assert_eq!(Verdict::from_status(Some("SUCCESS")), Verdict::Success);
        assert_eq!(
            Verdict::from_status(Some("FAILURE")),
            Verdict::Rejected(Some("FAILURE".to_string()))
        );
        assert_eq!(
            Verdict::from_status(Some("success")),
            Verdict::Rejected(Some("success".to_string()))
        );
        assert_eq!(
            Verdict::from_status(Some("")),
            Verdict::Rejected(Some(String::new()))
        );
        assert_eq!(Verdict::from_status(None), Verdict::Rejected(None));
    }

    #[actix_web::test]
    async fn forwards_headers_event_and_credentials() {
        let url = start_provider(|req, body| {
            let body: Value = serde_json::from_str(body).unwrap_or_default();
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some(EXPECTED_AUTH);
            let forwarded = body["auth_algo"] == "SHA256withRSA"
                && body["cert_url"] == "https://api.paypal.com/cert.pem"
                && body["transmission_id"] == "tx-1"
                && body["transmission_sig"] == "sig"
                && body["transmission_time"] == "2025-03-01T10:00:00Z"
                && body["webhook_id"] == "WH-1"
                && body["webhook_event"]["resource"]["custom_id"] == "user2";
            let status = if authorized && forwarded {
                "SUCCESS"
            } else {
                "FAILURE"
            };
            HttpResponse::Ok().json(json!({ "verification_status": status }))
        });

        let event = event(
            r#"{"event_type":"BILLING.SUBSCRIPTION.ACTIVATED","resource":{"custom_id":"user2","plan_id":"P-weekly+"}}"#,
        );
        let verdict = verifier(url).verify(&headers(), event.raw()).await.unwrap();
        assert_eq!(verdict, Verdict::Success);
    }

    const DELIVERED: &str = r#"{"resource": {"plan_id": "P-weekly", "custom_id": "user1"}, "id": "WH-9", "event_type": "BILLING.SUBSCRIPTION.ACTIVATED"}"#;

    #[actix_web::test]
    async fn provider_receives_the_delivered_event_unchanged() {
        let url = start_provider(|_, body| {
            let status = if body.contains(&format!(r#""webhook_event":{}"#, DELIVERED)) {
                "SUCCESS"
            } else {
                "FAILURE"
            };
            HttpResponse::Ok().json(json!({ "verification_status": status }))
        });

        let verdict = verifier(url)
            .verify(&headers(), event(DELIVERED).raw())
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Success);
    }

    #[actix_web::test]
    async fn error_status_with_json_body_is_a_rejection() {
        let url = start_provider(|_, _| {
            HttpResponse::Unauthorized().json(json!({ "name": "AUTHENTICATION_FAILURE" }))
        });

        let verdict = verifier(url).verify(&headers(), event("{}").raw()).await.unwrap();
        assert_eq!(verdict, Verdict::Rejected(None));
    }

    #[actix_web::test]
    async fn non_json_answer_is_an_error() {
        let url = start_provider(|_, _| HttpResponse::BadGateway().body("<html>upstream</html>"));

        let result = verifier(url).verify(&headers(), event("{}").raw()).await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[actix_web::test]
    async fn unreachable_provider_is_an_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let result = verifier(format!("http://127.0.0.1:{}/verify", port))
            .verify(&headers(), event("{}").raw())
            .await;
        assert!(matches!(result, Err(AppError::Reqwest(_))));
    }
}
