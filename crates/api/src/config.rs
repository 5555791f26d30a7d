use bitlings_core::rules::GameRules;
use bitlings_core::voting::DEFAULT_APPROVAL_THRESHOLD;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Net votes a `voting` proposal needs to be promoted (default: `10`).
    pub approval_threshold: i64,
    /// Collection owner when a request names none; also receives promoted
    /// creatures.
    pub default_user_id: String,
    /// Shared secret for `/admin` routes. Admin routes are disabled when unset.
    pub admin_token: Option<String>,
    /// Load the demo roster at startup (default: `true`).
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APPROVAL_THRESHOLD`   | `10`                       |
    /// | `DEFAULT_USER_ID`      | `demo-user-id`             |
    /// | `ADMIN_TOKEN`          | (unset)                    |
    /// | `SEED_DEMO_DATA`       | `true`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let approval_threshold: i64 = std::env::var("APPROVAL_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_APPROVAL_THRESHOLD.to_string())
            .parse()
            .expect("APPROVAL_THRESHOLD must be a valid i64");

        let default_user_id =
            std::env::var("DEFAULT_USER_ID").unwrap_or_else(|_| "demo-user-id".into());

        let admin_token = std::env::var("ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let seed_demo_data: bool = std::env::var("SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SEED_DEMO_DATA must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            approval_threshold,
            default_user_id,
            admin_token,
            seed_demo_data,
        }
    }

    /// Game rules derived from this configuration.
    pub fn game_rules(&self) -> GameRules {
        GameRules::with_threshold(self.approval_threshold)
    }
}
