use anyhow::{Context, Result};
use ruta_db::{create_pool, run_migrations};
use ruta_server::ai::AiClient;
use ruta_server::config::load_config;
use ruta_server::mailer::Mailer;
use ruta_server::seed;
use ruta_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Ruta server");

    // Load configuration
    let config_path = std::env::var("RUTA_CONFIG").unwrap_or_else(|_| "ruta.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);
    let config = load_config(&config_path)?;

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.db.url)
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // Seed the default admin and, when configured, the demo catalog
    seed::seed_admin(&pool, &config.auth.admin)
        .await
        .context("Failed to seed admin account")?;

    if config.seed_sample_data {
        seed::seed_sample_data(&pool)
            .await
            .context("Failed to seed sample data")?;
    }

    // Set up outbound mail
    let mailer = match &config.mail {
        Some(mail_config) => Some(Mailer::from_config(mail_config)?),
        None => {
            tracing::warn!("Mail is not configured, verification mail will not be sent");
            None
        }
    };

    // Set up the chat completion client
    let ai = AiClient::from_config(&config.ai);

    let listen = config.listen.clone();
    let state = AppState::new(pool, config, mailer, ai);

    // Build router
    let app = ruta_server::web::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
