mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use api_subs::{WebhookState, services::verify::PayPalVerifier};
use common::env_config::Config;
use db::store::PgSubscriptionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_file).expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // webhook pipeline: PayPal verification, Postgres subscriber store
    let verifier = PayPalVerifier::new(config.paypal.clone())
        .expect("Failed to build PayPal verification client");
    let webhook_state = web::Data::new(WebhookState {
        verifier: Arc::new(verifier),
        store: Arc::new(PgSubscriptionStore::new(pool.clone())),
        plans: config.plans.clone(),
        unknown_plan_policy: config.unknown_plan_policy,
    });
    if config.paypal.webhook_id.is_empty() {
        log::warn!("PAYPAL_WEBHOOK_ID is not set, every webhook will fail verification");
    }

    log::info!(
        "Listening on {}:{} ({} plans, unknown plans: {:?})",
        config.server_host,
        config.server_port,
        config.plans.entries().len(),
        config.unknown_plan_policy
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(webhook_state.clone())
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_subs::mount_webhook())
                    .service(api_subs::mount_subs())
                    .service(api_subs::mount_users())
                    .service(api_requests::mount_requests()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
