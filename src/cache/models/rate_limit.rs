use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户翻译滑动窗口缓存数据模型，过期交给 Redis 的 TTL
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CachedTranslationWindow {
    pub entries: Vec<DateTime<Utc>>,
}
