/// 缓存数据模型
/// 定义缓存数据的结构体
pub mod rate_limit;

pub use rate_limit::CachedTranslationWindow;
