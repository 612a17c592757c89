use std::sync::{Arc, OnceLock};

use carbontune_core::knowledge_base::KnowledgeBase;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: carbontune_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Knowledge Base, published once the region table has loaded.
    pub knowledge: Arc<OnceLock<KnowledgeBase>>,
}

impl AppState {
    /// State with an empty knowledge cell, filled later by the region loader.
    pub fn new(pool: carbontune_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            knowledge: Arc::new(OnceLock::new()),
        }
    }

    /// The loaded Knowledge Base, or 503 while the region table is loading.
    pub fn knowledge_base(&self) -> AppResult<&KnowledgeBase> {
        self.knowledge.get().ok_or_else(|| {
            AppError::StoreUnavailable(
                "Carbon intensity data is still loading, please retry shortly".into(),
            )
        })
    }
}
