use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub subscription_plan: Option<String>,
    pub subscription_requests: Option<i32>,
    pub subscription_active: Option<bool>,
    pub subscription_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The subscription a user holds. Either every field is stored or none is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: String,
    pub requests: i32,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn subscription(&self) -> Option<Subscription> {
        match (
            &self.subscription_plan,
            self.subscription_requests,
            self.subscription_active,
            self.subscription_updated_at,
        ) {
            (Some(plan), Some(requests), Some(active), Some(updated_at)) => Some(Subscription {
                plan: plan.clone(),
                requests,
                active,
                updated_at,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user1".to_string(),
            email: "client1@example.com".to_string(),
            display_name: "Client One".to_string(),
            role: "user".to_string(),
            subscription_plan: None,
            subscription_requests: None,
            subscription_active: None,
            subscription_updated_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn subscription_is_none_until_every_column_is_set() {
        let mut user = user();
        assert_eq!(user.subscription(), None);

        user.subscription_plan = Some("Weekly".to_string());
        user.subscription_requests = Some(1);
        user.subscription_active = Some(true);
        assert_eq!(user.subscription(), None);

        let now = Utc::now();
        user.subscription_updated_at = Some(now);
        assert_eq!(
            user.subscription(),
            Some(Subscription {
                plan: "Weekly".to_string(),
                requests: 1,
                active: true,
                updated_at: now,
            })
        );
    }

    #[test]
    fn subscription_serializes_camel_case() {
        let value = serde_json::to_value(Subscription {
            plan: "Weekly+".to_string(),
            requests: 2,
            active: true,
            updated_at: Utc::now(),
        })
        .unwrap();
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["requests"], 2);
    }
}
