/// 缓存键模块
/// 提供各种缓存键生成函数

// 翻译限流键
pub mod translation_keys;

pub use translation_keys::user_translations_key;
