use std::sync::Arc;

use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    plan::PlanEntitlement,
};
use sqlx::PgPool;

use crate::models::user::Subscription;

/// Write side of subscriber records, as used by the payment webhook.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Marks the subscriber's subscription active on `plan`, replacing the
    /// whole subscription in one write. Fails when the subscriber does not
    /// exist.
    async fn activate_subscription(&self, user_id: &str, plan: &PlanEntitlement)
    -> Res<Subscription>;
}

pub struct PgSubscriptionStore {
    pool: Arc<PgPool>,
}

impl PgSubscriptionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn activate_subscription(
        &self,
        user_id: &str,
        plan: &PlanEntitlement,
    ) -> Res<Subscription> {
        crate::user::activate_subscription(self.pool.as_ref(), user_id, plan)
            .await?
            .and_then(|user| user.subscription())
            .ok_or_else(|| AppError::Internal(format!("Subscriber not found: {}", user_id)))
    }
}
