use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use common::{
    error::{AppError, Res},
    plan::PlanEntitlement,
};
use db::{models::user::Subscription, store::SubscriptionStore};
use serde_json::value::RawValue;

use crate::{
    dtos::webhook::TransmissionHeaders,
    services::verify::{SignatureVerifier, Verdict},
};

/// Answers every verification with a fixed status, or fails like an
/// unreachable provider. `Exact` succeeds only when the forwarded event is
/// byte-for-byte the given text.
pub(crate) enum StubVerifier {
    Status(Option<String>),
    Exact(String),
    Unreachable,
}

impl StubVerifier {
    pub(crate) fn status(status: &str) -> Self {
        StubVerifier::Status(Some(status.to_string()))
    }
}

#[async_trait]
impl SignatureVerifier for StubVerifier {
    async fn verify(&self, _headers: &TransmissionHeaders, event: &RawValue) -> Res<Verdict> {
        match self {
            StubVerifier::Status(status) => Ok(Verdict::from_status(status.as_deref())),
            StubVerifier::Exact(expected) if event.get() == expected => Ok(Verdict::Success),
            StubVerifier::Exact(_) => Ok(Verdict::from_status(Some("FAILURE"))),
            StubVerifier::Unreachable => {
                Err(AppError::Internal("connection refused".to_string()))
            }
        }
    }
}

/// Subscriber records kept in memory.
#[derive(Default)]
pub(crate) struct MemoryStore {
    users: Mutex<HashMap<String, Option<Subscription>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn with_users(ids: &[&str]) -> Self {
        let store = MemoryStore::default();
        {
            let mut users = store.users.lock().unwrap();
            for id in ids {
                users.insert(id.to_string(), None);
            }
        }
        store
    }

    pub(crate) fn subscription(&self, user_id: &str) -> Option<Subscription> {
        self.users.lock().unwrap().get(user_id).cloned().flatten()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn activate_subscription(
        &self,
        user_id: &str,
        plan: &PlanEntitlement,
    ) -> Res<Subscription> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::Internal(format!("Subscriber not found: {}", user_id)))?;
        let subscription = Subscription {
            plan: plan.name.clone(),
            requests: plan.requests,
            active: true,
            updated_at: Utc::now(),
        };
        *slot = Some(subscription.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(subscription)
    }
}
