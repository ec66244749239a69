use serde_json::Value;
use thiserror::Error;

/// 存储层错误（Postgres / Redis）
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 翻译服务调用错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service returned status {status}")]
    Status { status: u16, details: Value },
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Request(e) => e.status().map(|s| s.as_u16()),
            ProviderError::Status { status, .. } => Some(*status),
        }
    }

    /// 返回给调用方的错误详情
    pub fn details(&self) -> Value {
        match self {
            ProviderError::Request(e) => Value::String(e.to_string()),
            ProviderError::Status { details, .. } => details.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("free translation quota exhausted")]
    QuotaExceeded,

    #[error("rate limit exceeded, retry in {cooldown}s")]
    RateLimited { cooldown: u64, limit: u32 },

    #[error("translation provider unavailable")]
    ProviderUnavailable {
        status: Option<u16>,
        details: Value,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<ProviderError> for TranslateError {
    fn from(e: ProviderError) -> Self {
        TranslateError::ProviderUnavailable {
            status: e.status(),
            details: e.details(),
        }
    }
}
