//! 内存实现，供单元测试与路由测试使用

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::error::{ProviderError, StoreError};
use super::provider::TranslationProvider;
use super::store::{NewAnonymousUsage, UsageStore, UserStore, WindowStore};

#[derive(Default)]
pub struct MemoryUsageStore {
    records: Mutex<Vec<NewAnonymousUsage>>,
}

impl MemoryUsageStore {
    pub fn records(&self) -> Vec<NewAnonymousUsage> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn count_since(&self, ip_address: &str, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.ip_address == ip_address && r.created_at >= since)
            .count() as u64)
    }

    async fn record(&self, usage: NewAnonymousUsage) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(usage);
        Ok(())
    }
}

/// 不模拟过期，过期由窗口自身的 prune 处理
#[derive(Default)]
pub struct MemoryWindowStore {
    windows: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
    fail_save: AtomicBool,
}

impl MemoryWindowStore {
    /// 下一次 save 返回错误
    pub fn fail_next_save(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    pub fn entries(&self, user_id: &str) -> Vec<DateTime<Utc>> {
        self.windows
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn load(&self, user_id: &str) -> Result<Vec<DateTime<Utc>>, StoreError> {
        Ok(self.entries(user_id))
    }

    async fn save(
        &self,
        user_id: &str,
        entries: &[DateTime<Utc>],
        _ttl: Duration,
    ) -> Result<(), StoreError> {
        if self.fail_save.swap(false, Ordering::SeqCst) {
            let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
            return Err(StoreError::Serialization(err));
        }
        self.windows
            .lock()
            .unwrap()
            .insert(user_id.to_string(), entries.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    counts: Mutex<HashMap<String, i64>>,
}

impl MemoryUserStore {
    pub fn count(&self, user_id: &str) -> i64 {
        self.counts.lock().unwrap().get(user_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn increment_translations(&self, user_id: &str) -> Result<(), StoreError> {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn translations_count(&self, user_id: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.counts.lock().unwrap().get(user_id).copied())
    }
}

/// 固定返回译文的 provider，可设置下一次调用失败
pub struct ScriptedProvider {
    reply: String,
    fail_with: Mutex<Option<u16>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn translating(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail_with: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_next(&self, status: u16) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    async fn translate(&self, _text: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with.lock().unwrap().take() {
            return Err(ProviderError::Status {
                status,
                details: json!({ "error": { "code": status, "message": "upstream unavailable" } }),
            });
        }
        Ok(self.reply.clone())
    }
}
