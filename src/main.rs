use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use gradebook::logging::init_tracing;
use gradebook::metrics::init_metrics;
use gradebook::router::init_router;
use gradebook::state::AppState;
use gradebook_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};
use gradebook_db::{init_db_pool, postgres::PgStore, run_migrations};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;
    let password_config = PasswordConfig::from_env();
    let cors_config = CorsConfig::from_env();
    let server_config = ServerConfig::from_env();

    let pool = init_db_pool(&database_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if server_config.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
        info!("Database migrations applied");
    }

    let metrics_handle = init_metrics()?;

    let state = AppState::new(Arc::new(PgStore::new(pool)), jwt_config)
        .with_password_config(password_config)
        .with_cors_config(cors_config);
    let app = init_router(state, metrics_handle);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server running");
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
