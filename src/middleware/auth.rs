use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    error::AppError,
    utils::{Claims, ROLE_USER, verify_token},
};

fn bearer_claims(req: &Request, state: &AppState) -> Option<Result<Claims, AppError>> {
    let header = req.headers().typed_get::<Authorization<Bearer>>()?;
    Some(verify_token(header.token(), &state.config).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::Unauthorized
    }))
}

/// 公开路由：令牌有效时附加 Claims，否则按匿名处理
pub async fn identify(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(Ok(claims)) = bearer_claims(&req, &state) {
        req.extensions_mut().insert(claims);
    }
    next.run(req).await
}

/// 用户路由：要求有效令牌且角色为 user
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(&req, &state).ok_or(AppError::Unauthorized)??;

    if claims.role != ROLE_USER {
        tracing::info!("User {} with role {} denied", claims.sub, claims.role);
        return Err(AppError::Forbidden("User"));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// 可选的当前用户
pub struct MaybeUser(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Claims>().cloned()))
    }
}

/// 必须存在的当前用户，需配合 `require_user` 使用
pub struct CurrentUser(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
