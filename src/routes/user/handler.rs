use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::AppError,
    middleware::CurrentUser,
    routes::response::{STATUS_SUCCESS, TextBody, validate_text},
};

use super::model::{UserTranslateResponse, UserUsageResponse};

/// 登录用户翻译，按用户滑动窗口限流
#[axum::debug_handler]
pub async fn translate(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    TextBody(text): TextBody,
) -> Result<Response, AppError> {
    validate_text(&text, Some(state.config.max_text_length))?;

    let response = match state.governor.translate_for_user(&text, &claims.sub).await {
        Ok(out) => (
            StatusCode::OK,
            Json(UserTranslateResponse {
                translation: out.translation,
                status: STATUS_SUCCESS,
                remaining: out.remaining,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    };

    Ok(response)
}

/// 当前窗口剩余次数与累计翻译数
#[axum::debug_handler]
pub async fn usage(State(state): State<AppState>, CurrentUser(claims): CurrentUser) -> Response {
    match state.governor.user_usage(&claims.sub).await {
        Ok(usage) => (
            StatusCode::OK,
            Json(UserUsageResponse {
                translations_count: usage.translations_count,
                remaining: usage.remaining,
                cooldown: usage.cooldown,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
