use std::sync::Arc;

use common::{
    error::Res,
    plan::{PlanTable, UnknownPlanPolicy},
};
use db::{models::user::Subscription, store::SubscriptionStore};

use crate::{
    dtos::webhook::{TransmissionHeaders, WebhookEvent},
    services::{
        entitlement,
        event::{self, WebhookAction},
        verify::{SignatureVerifier, Verdict},
    },
};

/// Everything the webhook pipeline needs, built once at start-up.
#[derive(Clone)]
pub struct WebhookState {
    pub verifier: Arc<dyn SignatureVerifier>,
    pub store: Arc<dyn SubscriptionStore>,
    pub plans: PlanTable,
    pub unknown_plan_policy: UnknownPlanPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// The provider did not vouch for the delivery. Nothing was written.
    Rejected(Option<String>),
    Ignored(Option<String>),
    Activated {
        subscriber_id: String,
        subscription: Subscription,
    },
}

/// Verifies, interprets and applies one webhook delivery.
pub async fn process_webhook(
    state: &WebhookState,
    headers: &TransmissionHeaders,
    event: &WebhookEvent,
) -> Res<WebhookOutcome> {
    if let Verdict::Rejected(status) = state.verifier.verify(headers, event.raw()).await? {
        log::warn!(
            "Webhook {} failed verification: {:?}",
            headers.transmission_id.as_deref().unwrap_or("<none>"),
            status
        );
        return Ok(WebhookOutcome::Rejected(status));
    }

    match event::interpret(event.value()) {
        WebhookAction::Activate {
            subscriber_id,
            plan_id,
        } => {
            let subscription = entitlement::apply_activation(
                state.store.as_ref(),
                &state.plans,
                state.unknown_plan_policy,
                subscriber_id.as_deref(),
                plan_id.as_deref(),
            )
            .await?;
            Ok(WebhookOutcome::Activated {
                subscriber_id: subscriber_id.unwrap_or_default(),
                subscription,
            })
        }
        WebhookAction::Ignore(event_type) => {
            log::info!("Unhandled event type: {:?}", event_type);
            Ok(WebhookOutcome::Ignored(event_type))
        }
    }
}
