use db::models::user::{Subscription, User};
use serde::Serialize;

/// A user as the admin dashboard lists them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub subscription: Option<Subscription>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            subscription: user.subscription(),
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}
