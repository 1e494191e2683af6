//! Resets the database and fills it with demo subscribers and design requests.

use chrono::{Duration, Utc};
use common::error::Res;
use db::{
    dtos::{request::DesignRequestCreateRequest, user::UserCreateRequest},
    models::{request::RequestStatus, user::Subscription},
};

struct DemoUser {
    id: &'static str,
    email: &'static str,
    display_name: &'static str,
    role: &'static str,
    plan: Option<(&'static str, i32)>,
}

const DEMO_USERS: [DemoUser; 4] = [
    DemoUser {
        id: "user1",
        email: "client1@example.com",
        display_name: "Client One",
        role: "user",
        plan: Some(("Weekly", 1)),
    },
    DemoUser {
        id: "user2",
        email: "client2@example.com",
        display_name: "Client Two",
        role: "user",
        plan: Some(("Weekly+", 2)),
    },
    DemoUser {
        id: "user3",
        email: "client3@example.com",
        display_name: "Client Three",
        role: "user",
        plan: Some(("Weekly++", 3)),
    },
    DemoUser {
        id: "admin1",
        email: "admin@example.com",
        display_name: "Admin User",
        role: "admin",
        plan: None,
    },
];

// (client, brief, status, age in days)
const DEMO_REQUESTS: [(&str, &str, RequestStatus, i64); 6] = [
    ("user1", "Design a logo for my startup", RequestStatus::Pending, 0),
    ("user1", "Create a banner for my website", RequestStatus::InProgress, 1),
    ("user2", "Redesign my business cards", RequestStatus::Pending, 0),
    ("user2", "Make a flyer for an event", RequestStatus::InProgress, 2),
    ("user3", "Design a full website mockup", RequestStatus::Pending, 0),
    ("user3", "Create social media graphics", RequestStatus::Completed, 3),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let database_url = std::env::var("DATABASE_URL")?;
    let require_ssl = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");
    let pool = db::setup(&database_url, require_ssl).await?;

    seed(&pool).await?;
    log::info!("Demo data population completed successfully.");
    Ok(())
}

async fn seed(pool: &sqlx::PgPool) -> Res<()> {
    let mut tx = pool.begin().await?;

    let requests = db::request::delete_all_requests(&mut *tx).await?;
    let users = db::user::delete_all_users(&mut *tx).await?;
    log::info!("Deleted {} requests and {} users", requests, users);

    let now = Utc::now();
    for demo in DEMO_USERS {
        let user = db::user::upsert_user(
            &mut *tx,
            UserCreateRequest {
                id: demo.id.to_string(),
                email: demo.email.to_string(),
                display_name: demo.display_name.to_string(),
                role: demo.role.to_string(),
                subscription: demo.plan.map(|(plan, requests)| Subscription {
                    plan: plan.to_string(),
                    requests,
                    active: true,
                    updated_at: now,
                }),
            },
        )
        .await?;
        log::info!("Added user: {}", user.display_name);
    }

    for (client_id, brief, status, age_days) in DEMO_REQUESTS {
        let request = db::request::insert_request(
            &mut *tx,
            DesignRequestCreateRequest {
                client_id: client_id.to_string(),
                brief: brief.to_string(),
                status,
                created_at: now - Duration::days(age_days),
            },
        )
        .await?;
        log::info!(
            "Added request: {} for {} with ID: {}",
            request.brief,
            request.client_id,
            request.id
        );
    }

    tx.commit().await?;
    Ok(())
}
