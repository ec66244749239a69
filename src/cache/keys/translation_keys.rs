/// 用户翻译滑动窗口键前缀
const USER_TRANSLATIONS_PREFIX: &str = "user:";

/// 生成用户翻译滑动窗口键，形如 `user:{id}:translations`
pub fn user_translations_key(user_id: &str) -> String {
    format!("{}{}:translations", USER_TRANSLATIONS_PREFIX, user_id)
}
