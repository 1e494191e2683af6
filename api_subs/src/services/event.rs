use serde_json::Value;

/// Event type PayPal sends once a recurring subscription becomes active.
pub const SUBSCRIPTION_ACTIVATED: &str = "BILLING.SUBSCRIPTION.ACTIVATED";

/// What a verified webhook event asks of us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    Activate {
        /// Our own user id, passed through checkout as `custom_id`.
        subscriber_id: Option<String>,
        plan_id: Option<String>,
    },
    /// Acknowledged without any state change.
    Ignore(Option<String>),
}

pub fn interpret(event: &Value) -> WebhookAction {
    let event_type = event.get("event_type").and_then(Value::as_str);
    match event_type {
        Some(SUBSCRIPTION_ACTIVATED) => {
            let resource_field = |name: &str| {
                event
                    .get("resource")
                    .and_then(|resource| resource.get(name))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            WebhookAction::Activate {
                subscriber_id: resource_field("custom_id"),
                plan_id: resource_field("plan_id"),
            }
        }
        other => WebhookAction::Ignore(other.map(str::to_string)),
    }
}
