use std::sync::Arc;

use config::Config;
use governor::{
    GeminiConfig, GeminiProvider, GovernorConfig, ProviderError, TranslationGovernor,
};
use redis::Client as RedisClient;
use sqlx::PgPool;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod governor;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub governor: Arc<TranslationGovernor>,
}

impl AppState {
    pub fn new(config: Config, governor: Arc<TranslationGovernor>) -> Self {
        Self { config, governor }
    }
}

/// 用 Gemini、Postgres 和 Redis 组装翻译管控器
pub fn build_governor(
    config: &Config,
    pool: PgPool,
    redis: Arc<RedisClient>,
) -> Result<TranslationGovernor, ProviderError> {
    let provider = GeminiProvider::new(GeminiConfig::from(config))?;

    Ok(TranslationGovernor::new(
        GovernorConfig::from(config),
        Arc::new(provider),
        Arc::new(database::PgUsageStore::new(pool.clone())),
        Arc::new(cache::RedisWindowStore::new(redis)),
        Arc::new(database::PgUserStore::new(pool)),
    ))
}
