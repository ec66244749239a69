use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// 请求级错误：鉴权与参数校验
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Access denied. {0} privileges required")]
    Forbidden(&'static str),

    #[error("{message}")]
    Validation { field: &'static str, message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
            }
            AppError::Forbidden(_) => {
                (StatusCode::FORBIDDEN, Json(json!({ "message": message }))).into_response()
            }
            AppError::Validation { field, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": message,
                    "errors": { field: [message.clone()] },
                })),
            )
                .into_response(),
        }
    }
}
