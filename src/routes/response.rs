use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::governor::TranslateError;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_LIMIT_REACHED: &str = "limit_reached";
pub const STATUS_ERROR: &str = "error";

pub const LIMIT_REACHED_MESSAGE: &str =
    "You've reached the limit of free translations. Please sign in to continue using our service!";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "The translation service is currently unavailable. Please try again later.";
pub const TRANSLATION_ERROR_MESSAGE: &str = "An error occurred during translation.";

#[derive(Debug, Serialize)]
pub struct RateLimitResponse {
    pub error: &'static str,
    pub message: String,
    pub cooldown: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceErrorResponse {
    pub status: &'static str,
    pub error: &'static str,
    pub message: &'static str,
    pub details: Value,
}

/// 匿名额度用尽时的响应体，与成功响应同形
#[derive(Debug, Serialize)]
pub struct LimitReachedResponse {
    pub translation: &'static str,
    pub status: &'static str,
    #[serde(rename = "remainingTranslations")]
    pub remaining_translations: u32,
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        match self {
            TranslateError::QuotaExceeded => (
                StatusCode::FORBIDDEN,
                Json(LimitReachedResponse {
                    translation: LIMIT_REACHED_MESSAGE,
                    status: STATUS_LIMIT_REACHED,
                    remaining_translations: 0,
                }),
            )
                .into_response(),
            TranslateError::RateLimited { cooldown, limit } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(RateLimitResponse {
                    error: "Rate limit exceeded",
                    message: format!("You can only make {} translations per minute.", limit),
                    cooldown,
                }),
            )
                .into_response(),
            TranslateError::ProviderUnavailable { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServiceErrorResponse {
                    status: STATUS_ERROR,
                    error: "Translation service error",
                    message: SERVICE_UNAVAILABLE_MESSAGE,
                    details,
                }),
            )
                .into_response(),
            TranslateError::Storage(e) => {
                tracing::error!("Usage storage failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ServiceErrorResponse {
                        status: STATUS_ERROR,
                        error: "Translation failed",
                        message: TRANSLATION_ERROR_MESSAGE,
                        details: Value::Null,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    #[serde(default)]
    text: String,
}

/// `{"text": ...}` 请求体；无法解析时返回 422 校验错误而不是 axum 的纯文本拒绝
#[derive(Debug)]
pub struct TextBody(pub String);

impl<S: Send + Sync> FromRequest<S> for TextBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<TextPayload>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(TextBody(payload.text)),
            Err(JsonRejection::JsonDataError(e)) => {
                tracing::debug!("Rejected translate body: {}", e.body_text());
                Err(AppError::Validation {
                    field: "text",
                    message: "The text field must be a string.".to_string(),
                })
            }
            Err(e) => {
                tracing::debug!("Unreadable translate body: {}", e.body_text());
                Err(AppError::Validation {
                    field: "text",
                    message: "The text field is required.".to_string(),
                })
            }
        }
    }
}

/// 校验待翻译文本：必填、非空白，可选最大字符数
pub fn validate_text(text: &str, max_chars: Option<usize>) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation {
            field: "text",
            message: "The text field is required.".to_string(),
        });
    }
    if let Some(max) = max_chars {
        if text.chars().count() > max {
            return Err(AppError::Validation {
                field: "text",
                message: format!("The text field must not be greater than {} characters.", max),
            });
        }
    }
    Ok(())
}
