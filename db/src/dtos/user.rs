use crate::models::user::Subscription;

pub struct UserCreateRequest {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub subscription: Option<Subscription>,
}
