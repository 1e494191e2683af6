use common::{
    error::{AppError, Res},
    plan::{PlanEntitlement, PlanTable, UnknownPlanPolicy},
};
use db::{models::user::Subscription, store::SubscriptionStore};

/// Looks the plan id up in the table, falling back according to `policy`
/// when it is missing or unknown.
pub fn resolve_plan(
    plans: &PlanTable,
    policy: UnknownPlanPolicy,
    plan_id: Option<&str>,
) -> Res<PlanEntitlement> {
    if let Some(plan) = plan_id.and_then(|id| plans.get(id)) {
        return Ok(plan.clone());
    }
    match policy {
        UnknownPlanPolicy::Sentinel => {
            log::warn!(
                "Unknown plan id {:?}, activating the sentinel plan",
                plan_id
            );
            Ok(PlanEntitlement::unknown())
        }
        UnknownPlanPolicy::Reject => Err(AppError::BadRequest(format!(
            "Unknown plan id: {}",
            plan_id.unwrap_or("<missing>")
        ))),
    }
}

/// Grants the subscriber the entitlement of the activated plan.
pub async fn apply_activation(
    store: &dyn SubscriptionStore,
    plans: &PlanTable,
    policy: UnknownPlanPolicy,
    subscriber_id: Option<&str>,
    plan_id: Option<&str>,
) -> Res<Subscription> {
    let plan = resolve_plan(plans, policy, plan_id)?;
    let subscriber_id = subscriber_id.ok_or_else(|| {
        AppError::Internal("Activation event carries no subscriber id".to_string())
    })?;

    let subscription = store.activate_subscription(subscriber_id, &plan).await?;
    log::info!(
        "Activated {} ({} concurrent requests) for {}",
        subscription.plan,
        subscription.requests,
        subscriber_id
    );
    Ok(subscription)
}
