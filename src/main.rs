// src/main.rs

use quiz_platform::config::Config;
use quiz_platform::error::AppError;
use quiz_platform::routes;
use quiz_platform::seed::seed_questions;
use quiz_platform::state::AppState;
use quiz_platform::store::Stores;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (.env included)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let stores = match &config.database_url {
        Some(url) => {
            let pool = connect_with_retry(url).await?;

            // Run Migrations Automatically
            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied successfully.");

            Stores::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores; data is lost on exit");
            Stores::in_memory()
        }
    };

    // Seed Questions
    if let Some(path) = &config.question_seed_file {
        match seed_questions(stores.questions.as_ref(), path).await {
            Ok(count) => tracing::info!("Seeded {} questions from {}", count, path),
            Err(e) => tracing::error!("Failed to seed questions from {}: {}", path, e),
        }
    }

    let addr = config.bind_addr;
    let state = AppState::new(config, stores);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::InternalServerError(format!("cannot bind {}: {}", addr, e)))?;
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Initialize Database Pool with Retry
async fn connect_with_retry(database_url: &str) -> Result<PgPool, AppError> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Database connected...");
                return Ok(pool);
            }
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!("Failed to connect to database after 5 retries");
                    return Err(AppError::from(e));
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
