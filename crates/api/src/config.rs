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
    /// Whether to apply pending migrations at startup (default: off).
    ///
    /// The soft-delete migration is a deliberate operator action; the admin
    /// API degrades gracefully while it is missing.
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `RUN_MIGRATIONS`       | `0`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let run_migrations = matches!(
            std::env::var("RUN_MIGRATIONS").as_deref(),
            Ok("1") | Ok("true")
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            run_migrations,
        }
    }
}

/// SMTP settings for the new-submission notification mail.
///
/// Entirely optional: if the required variables are absent the service runs
/// without outbound mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay hostname (`SMTP_RELAY`).
    pub relay: String,
    /// Sender mailbox (`SMTP_FROM`).
    pub from: String,
    /// Recipient mailbox for new-submission notices (`CONTACT_NOTIFY_TO`).
    pub notify_to: String,
    /// Optional credentials (`SMTP_USERNAME` / `SMTP_PASSWORD`).
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Load SMTP configuration, returning `None` when any required variable
    /// is missing.
    pub fn from_env() -> Option<Self> {
        let relay = std::env::var("SMTP_RELAY").ok()?;
        let from = std::env::var("SMTP_FROM").ok()?;
        let notify_to = std::env::var("CONTACT_NOTIFY_TO").ok()?;
        Some(Self {
            relay,
            from,
            notify_to,
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}
