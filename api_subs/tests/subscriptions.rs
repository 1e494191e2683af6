//! Subscription reads, the admin user listing and the Postgres subscriber
//! store against a real database. Skipped when `DATABASE_URL` is not set.

use std::sync::Arc;

use actix_web::{
    App,
    body::MessageBody,
    dev::ServiceResponse,
    http::StatusCode,
    test,
    web::{self},
};
use common::{error::AppError, plan::PlanEntitlement};
use db::{
    dtos::user::UserCreateRequest,
    store::{PgSubscriptionStore, SubscriptionStore},
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> Option<Arc<PgPool>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL is not set, skipping");
        return None;
    };
    Some(
        db::setup(&database_url, false)
            .await
            .expect("database setup failed"),
    )
}

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new().app_data(web::Data::new($pool.clone())).service(
                web::scope("/api")
                    .service(api_subs::mount_subs())
                    .service(api_subs::mount_users()),
            ),
        )
        .await
    };
}

async fn add_user(pool: &PgPool, display_name: &str) -> String {
    let id = format!("subscriber-{}", Uuid::new_v4());
    db::user::upsert_user(
        pool,
        UserCreateRequest {
            id: id.clone(),
            email: format!("{}@example.com", id),
            display_name: display_name.to_string(),
            role: "user".to_string(),
            subscription: None,
        },
    )
    .await
    .unwrap();
    id
}

async fn json_body<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

#[actix_web::test]
async fn unknown_user_has_no_subscription_record() {
    let Some(pool) = pool().await else { return };
    let app = app!(pool);

    let req = test::TestRequest::get()
        .uri("/api/sub/subscriber-that-does-not-exist")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn subscription_is_null_until_activated() {
    let Some(pool) = pool().await else { return };
    let app = app!(pool);
    let user = add_user(&pool, "Fresh Client").await;
    let uri = format!("/api/sub/{}", user);

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({ "subscription": null }));

    let store = PgSubscriptionStore::new(pool.clone());
    store
        .activate_subscription(&user, &PlanEntitlement::new("Weekly+", 2))
        .await
        .unwrap();

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let body = json_body(res).await;
    assert_eq!(body["subscription"]["plan"], "Weekly+");
    assert_eq!(body["subscription"]["requests"], 2);
    assert_eq!(body["subscription"]["active"], true);
    assert!(body["subscription"]["updatedAt"].is_string());
}

#[actix_web::test]
async fn activation_replaces_the_whole_subscription() {
    let Some(pool) = pool().await else { return };
    let user = add_user(&pool, "Upgrading Client").await;
    let store = PgSubscriptionStore::new(pool.clone());

    let first = store
        .activate_subscription(&user, &PlanEntitlement::new("Weekly", 1))
        .await
        .unwrap();
    let second = store
        .activate_subscription(&user, &PlanEntitlement::unknown())
        .await
        .unwrap();

    assert_eq!((second.plan.as_str(), second.requests), ("Unknown", 0));
    assert!(second.active);
    assert!(second.updated_at >= first.updated_at);
}

#[actix_web::test]
async fn activating_a_missing_subscriber_writes_nothing() {
    let Some(pool) = pool().await else { return };
    let store = PgSubscriptionStore::new(pool.clone());
    let ghost = format!("ghost-{}", Uuid::new_v4());

    let result = store
        .activate_subscription(&ghost, &PlanEntitlement::new("Weekly", 1))
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert!(
        db::user::get_user_by_id(pool.as_ref(), &ghost)
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn admin_listing_shows_users_with_their_subscription() {
    let Some(pool) = pool().await else { return };
    let app = app!(pool);
    let subscribed = add_user(&pool, "Listed Subscriber").await;
    let unsubscribed = add_user(&pool, "Listed Visitor").await;
    PgSubscriptionStore::new(pool.clone())
        .activate_subscription(&subscribed, &PlanEntitlement::new("Weekly++", 3))
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let users = body["users"].as_array().unwrap();
    let find = |id: &str| users.iter().find(|u| u["id"] == id).cloned().unwrap();

    let listed = find(&subscribed);
    assert_eq!(listed["displayName"], "Listed Subscriber");
    assert_eq!(listed["subscription"]["plan"], "Weekly++");
    assert_eq!(listed["subscription"]["requests"], 3);
    assert_eq!(find(&unsubscribed)["subscription"], Value::Null);
}
