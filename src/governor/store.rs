use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::error::StoreError;

/// 待写入的匿名使用记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnonymousUsage {
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub text_length: i32,
    pub created_at: DateTime<Utc>,
}

/// 匿名使用记录（只追加）
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// 统计某 IP 自 `since` 起的记录数
    async fn count_since(&self, ip_address: &str, since: DateTime<Utc>) -> Result<u64, StoreError>;

    async fn record(&self, usage: NewAnonymousUsage) -> Result<(), StoreError>;
}

/// 登录用户的滑动窗口时间戳
#[async_trait]
pub trait WindowStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Vec<DateTime<Utc>>, StoreError>;

    /// 覆盖写入，`ttl` 后自动过期
    async fn save(
        &self,
        user_id: &str,
        entries: &[DateTime<Utc>],
        ttl: Duration,
    ) -> Result<(), StoreError>;
}

/// 用户累计翻译次数
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn increment_translations(&self, user_id: &str) -> Result<(), StoreError>;

    async fn translations_count(&self, user_id: &str) -> Result<Option<i64>, StoreError>;
}
