use db::models::user::Subscription;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan_id: String,
    pub name: String,
    pub requests: i32,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserSubscriptionResponse {
    pub subscription: Option<Subscription>,
}
