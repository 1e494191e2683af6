use actix_web::web::{self};

pub mod routes {
    pub mod sub;
    pub mod user;
    pub mod webhook;
}

pub mod services {
    pub mod entitlement;
    pub mod event;
    pub(crate) mod sub;
    pub mod verify;
    pub mod webhook;
}

pub mod dtos {
    pub(crate) mod sub;
    pub(crate) mod user;
    pub mod webhook;
}

#[cfg(test)]
mod testing;

pub use services::webhook::WebhookState;

pub fn mount_subs() -> actix_web::Scope {
    web::scope("/sub")
        .service(routes::sub::get_plans)
        .service(routes::sub::get_current)
}
pub fn mount_users() -> actix_web::Scope {
    web::scope("/users").service(routes::user::get_users)
}
pub fn mount_webhook() -> actix_web::Scope {
    web::scope("/pay").service(routes::webhook::post_paypal_webhook)
}
