use actix_web::body::MessageBody;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use colored::{ColoredString, Colorize};
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;
use std::rc::Rc;
use std::time::Instant;

/// Header PayPal sets on every webhook delivery; logged so redeliveries of
/// the same event can be matched up.
const TRANSMISSION_ID_HEADER: &str = "paypal-transmission-id";

pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let transmission_id = req
            .headers()
            .get(TRANSMISSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let started = Instant::now();
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let res = srv.call(req).await?;
            let status_code = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis();

            match transmission_id {
                Some(id) => info!(
                    "[{}] {} {} {} delivery={}",
                    colored_status(status_code),
                    colored_method(&method),
                    path.bright_white(),
                    format!("({}ms)", elapsed_ms).bright_black(),
                    id.bright_blue(),
                ),
                None => info!(
                    "[{}] {} {} {}",
                    colored_status(status_code),
                    colored_method(&method),
                    path.bright_white(),
                    format!("({}ms)", elapsed_ms).bright_black(),
                ),
            }

            Ok(res)
        })
    }
}

fn colored_status(status_code: u16) -> ColoredString {
    match status_code {
        200..=299 => status_code.to_string().green(),
        300..=399 => status_code.to_string().yellow(),
        400..=499 => status_code.to_string().bright_red(),
        _ => status_code.to_string().red(),
    }
}

fn colored_method(method: &str) -> ColoredString {
    match method {
        "GET" => method.blue(),
        "POST" => method.yellow(),
        "PUT" | "PATCH" => method.purple(),
        "DELETE" => method.red(),
        _ => method.normal(),
    }
}
