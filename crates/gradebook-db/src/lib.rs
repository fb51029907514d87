//! # Gradebook DB
//!
//! Database pool, migrations and stores for the Gradebook API.
//!
//! - [`store`]: the repository traits and the combined [`Store`] handle
//! - [`postgres`]: [`PgStore`], backed by a [`PgPool`]
//! - [`error`]: [`StoreError`], which keeps uniqueness failures apart from
//!   infrastructure failures
//!
//! With the `test-utils` feature, `memory::MemoryStore` provides the same
//! behaviour without a database.
//!
//! # Example
//!
//! ```ignore
//! use gradebook_config::DatabaseConfig;
//! use gradebook_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = std::sync::Arc::new(PgStore::new(pool));
//! ```

use std::time::Duration;

use gradebook_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use sqlx::PgPool;
pub use store::{
    CourseRepository, EnrollmentRepository, GradeRepository, Store, StoreResult, UserRepository,
};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects a pool and verifies it with a round trip.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Applies the migrations embedded from `crates/gradebook-db/migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
