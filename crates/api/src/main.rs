use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::config::{ServerConfig, SmtpConfig};
use atelier_api::notifications::mailer::Mailer;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_db::repositories::SubmissionRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = atelier_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    atelier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    if config.run_migrations {
        atelier_db::run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    }

    // Surface the degraded mode at startup so operators see it without
    // waiting for an admin to hit the trash view.
    match SubmissionRepo::soft_delete_column_present(&pool).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(
            "contact_submissions.deleted_at is missing; the trash view is \
             disabled until the soft-delete migration is applied"
        ),
        Err(e) => tracing::error!(error = %e, "Failed to probe soft-delete column"),
    }

    // --- Mailer ---
    let mailer = match SmtpConfig::from_env() {
        Some(smtp) => match Mailer::from_config(&smtp) {
            Ok(m) => {
                tracing::info!(relay = %smtp.relay, "SMTP notifications enabled");
                Some(Arc::new(m))
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid SMTP configuration, notifications disabled");
                None
            }
        },
        None => {
            tracing::info!("SMTP not configured, notifications disabled");
            None
        }
    };

    // --- App state / router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
