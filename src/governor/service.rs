use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::error::TranslateError;
use super::provider::TranslationProvider;
use super::store::{NewAnonymousUsage, UsageStore, UserStore, WindowStore};
use super::window::SlidingWindow;
use crate::config::Config;

/// 限额参数
#[derive(Debug, Clone)]
pub struct GovernorConfig {
    pub anonymous_limit: u32,
    pub anonymous_window: Duration,
    pub user_limit: u32,
    pub user_window: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            anonymous_limit: 2,
            anonymous_window: Duration::days(30),
            user_limit: 3,
            user_window: Duration::seconds(60),
        }
    }
}

impl From<&Config> for GovernorConfig {
    fn from(config: &Config) -> Self {
        Self {
            anonymous_limit: config.free_translation_limit,
            anonymous_window: config.free_translation_window(),
            user_limit: config.user_translation_limit,
            user_window: config.user_translation_window(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub translation: String,
    pub remaining: u32,
}

/// 登录用户当前窗口的使用情况
#[derive(Debug, Clone, PartialEq)]
pub struct UserUsage {
    pub translations_count: i64,
    pub remaining: u32,
    pub cooldown: Option<u64>,
}

pub struct TranslationGovernor {
    config: GovernorConfig,
    provider: Arc<dyn TranslationProvider>,
    usage: Arc<dyn UsageStore>,
    windows: Arc<dyn WindowStore>,
    users: Arc<dyn UserStore>,
}

impl TranslationGovernor {
    pub fn new(
        config: GovernorConfig,
        provider: Arc<dyn TranslationProvider>,
        usage: Arc<dyn UsageStore>,
        windows: Arc<dyn WindowStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config,
            provider,
            usage,
            windows,
            users,
        }
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// 有登录用户时走用户限流，否则按 IP 计算免费额度
    pub async fn translate(&self, req: TranslationRequest) -> Result<Translation, TranslateError> {
        self.translate_at(req, Utc::now()).await
    }

    pub async fn translate_at(
        &self,
        req: TranslationRequest,
        now: DateTime<Utc>,
    ) -> Result<Translation, TranslateError> {
        match req.user_id.as_deref() {
            Some(user_id) => self.translate_for_user_at(&req.text, user_id, now).await,
            None => {
                self.translate_anonymous_at(&req.text, &req.ip_address, req.user_agent, now)
                    .await
            }
        }
    }

    pub async fn translate_anonymous(
        &self,
        text: &str,
        ip_address: &str,
        user_agent: Option<String>,
    ) -> Result<Translation, TranslateError> {
        self.translate_anonymous_at(text, ip_address, user_agent, Utc::now())
            .await
    }

    pub async fn translate_anonymous_at(
        &self,
        text: &str,
        ip_address: &str,
        user_agent: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Translation, TranslateError> {
        // 窗口超出时间范围时退回到纪元起点，等同于统计全部记录
        let since = now
            .checked_sub_signed(self.config.anonymous_window)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Anonymous window {:?} out of range, counting all usage",
                    self.config.anonymous_window
                );
                DateTime::<Utc>::UNIX_EPOCH
            });
        let used = self.usage.count_since(ip_address, since).await?;
        let limit = self.config.anonymous_limit as u64;

        if used >= limit {
            tracing::info!("Free translation limit reached for {}", ip_address);
            return Err(TranslateError::QuotaExceeded);
        }

        let translation = self.provider.translate(text).await.map_err(|e| {
            tracing::error!("Anonymous translation failed for {}: {}", ip_address, e);
            TranslateError::from(e)
        })?;

        self.usage
            .record(NewAnonymousUsage {
                ip_address: ip_address.to_string(),
                user_agent,
                text_length: i32::try_from(text.len()).unwrap_or(i32::MAX),
                created_at: now,
            })
            .await?;

        Ok(Translation {
            translation,
            remaining: limit.saturating_sub(used + 1) as u32,
        })
    }

    pub async fn translate_for_user(
        &self,
        text: &str,
        user_id: &str,
    ) -> Result<Translation, TranslateError> {
        self.translate_for_user_at(text, user_id, Utc::now()).await
    }

    pub async fn translate_for_user_at(
        &self,
        text: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Translation, TranslateError> {
        let mut window = self.load_window(user_id, now).await?;

        if let Some(cooldown) = window.cooldown(now) {
            tracing::info!("User {} rate limited for {}s", user_id, cooldown);
            return Err(TranslateError::RateLimited {
                cooldown,
                limit: self.config.user_limit,
            });
        }

        let translation = self.provider.translate(text).await.map_err(|e| {
            tracing::error!("Translation failed for user {}: {}", user_id, e);
            TranslateError::from(e)
        })?;

        // 先落窗口再加累计次数：窗口写失败时不能留下多算的次数
        window.push(now);
        self.windows
            .save(user_id, &window.entries(), window.window())
            .await?;

        self.users.increment_translations(user_id).await?;

        Ok(Translation {
            translation,
            remaining: window.remaining() as u32,
        })
    }

    pub async fn user_usage(&self, user_id: &str) -> Result<UserUsage, TranslateError> {
        self.user_usage_at(user_id, Utc::now()).await
    }

    pub async fn user_usage_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UserUsage, TranslateError> {
        let window = self.load_window(user_id, now).await?;
        let translations_count = self
            .users
            .translations_count(user_id)
            .await?
            .unwrap_or(0);

        Ok(UserUsage {
            translations_count,
            remaining: window.remaining() as u32,
            cooldown: window.cooldown(now),
        })
    }

    async fn load_window(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SlidingWindow, TranslateError> {
        let entries = self.windows.load(user_id).await?;
        let mut window = SlidingWindow::from_entries(
            self.config.user_limit as usize,
            self.config.user_window,
            entries,
        );
        window.prune(now);
        Ok(window)
    }
}
