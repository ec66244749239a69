// 匿名试用记录
// 只追加，按 IP 和时间窗口计数

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::governor::{NewAnonymousUsage, StoreError, UsageStore};

/// 匿名试用记录存储
#[derive(Clone)]
pub struct PgUsageStore {
    pool: PgPool,
}

impl PgUsageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageStore for PgUsageStore {
    async fn count_since(&self, ip_address: &str, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM free_trial_usages
            WHERE ip_address = $1 AND created_at >= $2
            "#,
        )
        .bind(ip_address)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn record(&self, usage: NewAnonymousUsage) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO free_trial_usages (ip_address, user_agent, text_length, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#,
        )
        .bind(&usage.ip_address)
        .bind(&usage.user_agent)
        .bind(usage.text_length)
        .bind(usage.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!("Recorded free translation for {}", usage.ip_address);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to record free translation: {:?}", e);
                Err(e.into())
            }
        }
    }
}
