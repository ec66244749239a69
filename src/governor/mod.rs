// 翻译用量管控
// 额度检查 → 调用翻译服务 → 记录用量

pub mod error;
pub mod provider;
pub mod service;
pub mod store;
pub mod window;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{ProviderError, StoreError, TranslateError};
pub use provider::{GeminiConfig, GeminiProvider, TRANSLATION_PLACEHOLDER, TranslationProvider};
pub use service::{GovernorConfig, Translation, TranslationGovernor, TranslationRequest, UserUsage};
pub use store::{NewAnonymousUsage, UsageStore, UserStore, WindowStore};
pub use window::SlidingWindow;
