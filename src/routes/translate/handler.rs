use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{HeaderMapExt, UserAgent};

use crate::{
    AppState,
    error::AppError,
    governor::TranslationRequest,
    middleware::{ClientIp, MaybeUser},
    routes::response::{STATUS_SUCCESS, TextBody, validate_text},
};

use super::model::TranslateResponse;

/// 公开翻译接口：匿名按 IP 计免费额度，带有效令牌时按用户限流
#[axum::debug_handler]
pub async fn translate(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    MaybeUser(claims): MaybeUser,
    headers: HeaderMap,
    TextBody(text): TextBody,
) -> Result<Response, AppError> {
    validate_text(&text, None)?;

    let user_agent = headers
        .typed_get::<UserAgent>()
        .map(|ua| ua.as_str().to_string());

    let request = TranslationRequest {
        text,
        ip_address,
        user_agent,
        user_id: claims.map(|c| c.sub),
    };

    let response = match state.governor.translate(request).await {
        Ok(out) => (
            StatusCode::OK,
            Json(TranslateResponse {
                translation: out.translation,
                status: STATUS_SUCCESS,
                remaining_translations: out.remaining,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    };

    Ok(response)
}
