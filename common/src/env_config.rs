use std::{env, sync::Arc, time::Duration};

use crate::plan::{PlanTable, UnknownPlanPolicy};

/// Verification endpoint of the live PayPal API.
pub const PAYPAL_VERIFY_URL: &str =
    "https://api-m.paypal.com/v1/notifications/verify-webhook-signature";

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: database connection,
/// server host and port, number of worker threads, CORS settings,
/// logging preferences and the PayPal webhook settings.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger appends to.
    pub log_file: String,
    /// PayPal webhook verification settings.
    pub paypal: PayPalConfig,
    /// Provider plan id to entitlement lookup.
    pub plans: PlanTable,
    /// How activations for plan ids missing from `plans` are handled.
    pub unknown_plan_policy: UnknownPlanPolicy,
}

#[derive(Clone, Debug)]
/// `PayPalConfig` holds what is needed to ask PayPal whether an inbound
/// webhook delivery is authentic.
///
/// None of these values are ever taken from the request being verified.
pub struct PayPalConfig {
    /// Id of the webhook registered in the PayPal dashboard.
    pub webhook_id: String,
    /// REST app client id.
    pub client_id: String,
    /// REST app client secret.
    pub client_secret: String,
    /// The verify-webhook-signature endpoint.
    pub verify_url: String,
    /// Timeout of the verification call. `None` leaves it to the platform.
    pub verify_timeout: Option<Duration>,
}

impl PayPalConfig {
    /// Creates a new `PayPalConfig` instance from environment variables.
    ///
    /// - `PAYPAL_WEBHOOK_ID`, `PAYPAL_CLIENT_ID`, `PAYPAL_CLIENT_SECRET`: default to empty
    /// - `PAYPAL_VERIFY_URL`: defaults to the live PayPal endpoint
    /// - `PAYPAL_VERIFY_TIMEOUT_SECS`: optional
    ///
    /// # Panics
    ///
    /// Panics if `PAYPAL_VERIFY_TIMEOUT_SECS` is set but is not a number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        PayPalConfig {
            webhook_id: env::var("PAYPAL_WEBHOOK_ID").unwrap_or_default(),
            client_id: env::var("PAYPAL_CLIENT_ID").unwrap_or_default(),
            client_secret: env::var("PAYPAL_CLIENT_SECRET").unwrap_or_default(),
            verify_url: env::var("PAYPAL_VERIFY_URL")
                .unwrap_or_else(|_| PAYPAL_VERIFY_URL.to_string()),
            verify_timeout: env::var("PAYPAL_VERIFY_TIMEOUT_SECS").ok().map(|secs| {
                Duration::from_secs(
                    secs.parse()
                        .expect("PAYPAL_VERIFY_TIMEOUT_SECS must be a valid number"),
                )
            }),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: `development` or `production`
    /// - `DATABASE_URL`: Connection string for the database
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path (default: "studio.log")
    /// - `PAYPAL_PLANS`: Plan table as `P-id=Name:requests,...` (default: the three weekly plans)
    /// - `UNKNOWN_PLAN_POLICY`: `sentinel` or `reject` (default: sentinel)
    /// - PayPal settings (see `PayPalConfig::from_env`)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing or if
    /// the plan table or policy cannot be parsed.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let plans = match env::var("PAYPAL_PLANS") {
            Ok(table) => PlanTable::parse(&table).expect("PAYPAL_PLANS must be a valid plan table"),
            Err(_) => PlanTable::default(),
        };
        let unknown_plan_policy = env::var("UNKNOWN_PLAN_POLICY")
            .map(|policy| {
                policy
                    .parse()
                    .expect("UNKNOWN_PLAN_POLICY must be 'sentinel' or 'reject'")
            })
            .unwrap_or_default();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "studio.log".to_string()),
            paypal: PayPalConfig::from_env(),
            plans,
            unknown_plan_policy,
        })
    }
}
