use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// 匿名额度窗口上限（天）
pub const MAX_FREE_TRANSLATION_WINDOW_DAYS: u32 = 3650;
/// 用户限流窗口上限（秒）
pub const MAX_USER_TRANSLATION_WINDOW_SECS: u64 = 86_400;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub gemini_api_key: String,
    pub gemini_endpoint: String,
    pub gemini_timeout_secs: u64,
    pub free_translation_limit: u32,
    pub free_translation_window_days: u32,
    pub user_translation_limit: u32,
    pub user_translation_window_secs: u64,
    pub max_text_length: usize,
    /// 是否信任任意来源的 X-Real-IP / X-Forwarded-For
    pub trust_proxy_headers: bool,
    /// 只信任来自这些地址的转发头
    pub trusted_proxies: Vec<IpAddr>,
}

/// 读取可选环境变量，缺失或无法解析时使用默认值
fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// 读取可选环境变量并限制在 `min..=max` 内
fn var_in_range<T: FromStr + Ord>(key: &str, default: T, min: T, max: T) -> T {
    var_or(key, default).clamp(min, max)
}

/// 逗号分隔的 IP 列表，无法解析的项被忽略
fn parse_ip_list(raw: &str) -> Vec<IpAddr> {
    raw.split(',')
        .filter_map(|ip| {
            let ip = ip.trim();
            if ip.is_empty() {
                return None;
            }
            ip.parse()
                .map_err(|_| tracing::warn!("Ignoring invalid trusted proxy address: {}", ip))
                .ok()
        })
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            gemini_api_key: env::var("GEMINI_API_KEY")?,
            gemini_endpoint: env::var("GEMINI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_string()),
            gemini_timeout_secs: var_or("GEMINI_TIMEOUT_SECS", 30),
            free_translation_limit: var_or("FREE_TRANSLATION_LIMIT", 2),
            free_translation_window_days: var_in_range(
                "FREE_TRANSLATION_WINDOW_DAYS",
                30,
                1,
                MAX_FREE_TRANSLATION_WINDOW_DAYS,
            ),
            user_translation_limit: var_or("USER_TRANSLATION_LIMIT", 3),
            user_translation_window_secs: var_in_range(
                "USER_TRANSLATION_WINDOW_SECS",
                60,
                1,
                MAX_USER_TRANSLATION_WINDOW_SECS,
            ),
            max_text_length: var_or("MAX_TEXT_LENGTH", 1000),
            trust_proxy_headers: var_or("TRUST_PROXY_HEADERS", false),
            trusted_proxies: env::var("TRUSTED_PROXIES")
                .map(|raw| parse_ip_list(&raw))
                .unwrap_or_default(),
        })
    }

    /// 来自 `peer` 的请求是否可以使用转发头中的客户端地址
    pub fn trusts_forwarded_for(&self, peer: Option<IpAddr>) -> bool {
        self.trust_proxy_headers || peer.is_some_and(|ip| self.trusted_proxies.contains(&ip))
    }

    pub fn gemini_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini_timeout_secs)
    }

    pub fn free_translation_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.free_translation_window_days as i64)
    }

    pub fn user_translation_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.user_translation_window_secs as i64)
    }
}

#[cfg(test)]
impl Config {
    /// 测试用配置，不读取环境变量
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/cacaotalk_test".into(),
            redis_url: "redis://127.0.0.1/".into(),
            jwt_secret: "test-secret".into(),
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            gemini_api_key: "test-key".into(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.into(),
            gemini_timeout_secs: 30,
            free_translation_limit: 2,
            free_translation_window_days: 30,
            user_translation_limit: 3,
            user_translation_window_secs: 60,
            max_text_length: 1000,
            trust_proxy_headers: false,
            trusted_proxies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_or_falls_back_on_missing_or_garbage() {
        assert_eq!(var_or::<u32>("CACAOTALK_TEST_SURELY_UNSET", 7), 7);

        // SAFETY: test-local variable name, not read by any other test
        unsafe { env::set_var("CACAOTALK_TEST_GARBAGE_LIMIT", "three") };
        assert_eq!(var_or::<u32>("CACAOTALK_TEST_GARBAGE_LIMIT", 3), 3);

        unsafe { env::set_var("CACAOTALK_TEST_NUMERIC_LIMIT", " 5 ") };
        assert_eq!(var_or::<u32>("CACAOTALK_TEST_NUMERIC_LIMIT", 3), 5);
    }

    #[test]
    fn windows_are_clamped_to_range() {
        unsafe { env::set_var("CACAOTALK_TEST_HUGE_WINDOW", "18446744073709551615") };
        assert_eq!(
            var_in_range::<u64>("CACAOTALK_TEST_HUGE_WINDOW", 60, 1, MAX_USER_TRANSLATION_WINDOW_SECS),
            MAX_USER_TRANSLATION_WINDOW_SECS
        );

        unsafe { env::set_var("CACAOTALK_TEST_ZERO_WINDOW", "0") };
        assert_eq!(
            var_in_range::<u32>("CACAOTALK_TEST_ZERO_WINDOW", 30, 1, MAX_FREE_TRANSLATION_WINDOW_DAYS),
            1
        );
    }

    #[test]
    fn trusted_proxy_list_skips_garbage() {
        let ips = parse_ip_list("10.0.0.1, nonsense,,::1");
        assert_eq!(ips, vec!["10.0.0.1".parse::<IpAddr>().unwrap(), "::1".parse().unwrap()]);
    }

    #[test]
    fn forwarded_headers_need_explicit_trust() {
        let mut config = Config::for_tests();
        let proxy: IpAddr = "10.0.0.1".parse().unwrap();
        let client: IpAddr = "203.0.113.7".parse().unwrap();
        assert!(!config.trusts_forwarded_for(Some(proxy)));
        assert!(!config.trusts_forwarded_for(None));

        config.trusted_proxies = vec![proxy];
        assert!(config.trusts_forwarded_for(Some(proxy)));
        assert!(!config.trusts_forwarded_for(Some(client)));

        config.trust_proxy_headers = true;
        assert!(config.trusts_forwarded_for(Some(client)));
    }

    #[test]
    fn windows_convert_to_chrono_durations() {
        let config = Config::for_tests();
        assert_eq!(config.free_translation_window(), chrono::Duration::days(30));
        assert_eq!(config.user_translation_window(), chrono::Duration::seconds(60));
        assert_eq!(config.gemini_timeout(), Duration::from_secs(30));
    }
}
