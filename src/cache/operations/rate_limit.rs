use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::user_translations_key;
use crate::cache::models::rate_limit::CachedTranslationWindow;
use crate::governor::{StoreError, WindowStore};

/// 用户翻译滑动窗口缓存操作
pub struct TranslationWindowCacheOperations;

impl TranslationWindowCacheOperations {
    /// 获取用户的滑动窗口
    pub async fn get_window(
        redis: &Arc<RedisClient>,
        user_id: &str,
    ) -> Result<Option<CachedTranslationWindow>, StoreError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let key = user_translations_key(user_id);
        let result: Option<String> = conn.get(key).await?;

        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// 写入用户的滑动窗口，`ttl` 秒后过期
    pub async fn set_window(
        redis: &Arc<RedisClient>,
        user_id: &str,
        entries: &[DateTime<Utc>],
        ttl: u64,
    ) -> Result<(), StoreError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let cached = CachedTranslationWindow {
            entries: entries.to_vec(),
        };

        let key = user_translations_key(user_id);
        let json = serde_json::to_string(&cached)?;

        let _: () = conn.set_ex(key, json, ttl).await?;

        Ok(())
    }
}

/// 基于 Redis 的滑动窗口存储
#[derive(Clone)]
pub struct RedisWindowStore {
    redis: Arc<RedisClient>,
}

impl RedisWindowStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    async fn load(&self, user_id: &str) -> Result<Vec<DateTime<Utc>>, StoreError> {
        let cached = TranslationWindowCacheOperations::get_window(&self.redis, user_id).await?;
        Ok(cached.map(|w| w.entries).unwrap_or_default())
    }

    async fn save(
        &self,
        user_id: &str,
        entries: &[DateTime<Utc>],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let ttl = ttl.num_seconds().max(1) as u64;
        TranslationWindowCacheOperations::set_window(&self.redis, user_id, entries, ttl).await
    }
}
