// 缓存模块
// 包含缓存数据结构和操作逻辑

pub mod keys;
pub mod models;
pub mod operations;

pub use models::CachedTranslationWindow;
pub use operations::{RedisWindowStore, TranslationWindowCacheOperations};
