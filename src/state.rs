use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared per-process state handed to every handler. The hit counter is the
/// only mutable piece; it is best-effort and may be approximate under
/// concurrency.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            hits: Arc::new(AtomicU64::new(0)),
        }
    }
}
