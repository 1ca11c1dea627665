use crate::ai::AiClient;
use crate::config::ServerConfig;
use crate::mailer::Mailer;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    /// None when no mail section is configured; registration then reports
    /// the account as created but unverifiable.
    pub mailer: Option<Arc<Mailer>>,
    pub ai: AiClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: ServerConfig, mailer: Option<Mailer>, ai: AiClient) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            mailer: mailer.map(Arc::new),
            ai,
        }
    }
}
