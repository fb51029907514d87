use std::sync::Arc;

use gradebook_config::{CorsConfig, JwtConfig, PasswordConfig};
use gradebook_db::Store;

/// Shared, read-only application state.
///
/// The store is injected here by `main` (Postgres) or by tests (in-memory);
/// handlers never reach for a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig) -> Self {
        Self {
            store,
            jwt_config,
            password_config: PasswordConfig::default(),
            cors_config: CorsConfig::default(),
        }
    }

    pub fn with_password_config(mut self, password_config: PasswordConfig) -> Self {
        self.password_config = password_config;
        self
    }

    pub fn with_cors_config(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
