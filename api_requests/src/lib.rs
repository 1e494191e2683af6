use actix_web::web::{self};

pub mod routes {
    pub mod message;
    pub mod request;
}

mod services {
    pub(crate) mod message;
    pub(crate) mod request;
}

mod dtos {
    pub(crate) mod message;
    pub(crate) mod request;
}

pub fn mount_requests() -> actix_web::Scope {
    web::scope("/requests")
        .service(routes::request::post_request)
        .service(routes::request::get_requests)
        .service(routes::request::get_request)
        .service(routes::request::patch_request_status)
        .service(routes::message::post_message)
        .service(routes::message::get_messages)
}
