use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{identify, log_errors, require_user},
    routes::{health, translate, user},
};

// 公开路由：首页演示的翻译与健康检查
fn public_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/translate", post(translate::translate))
        .layer(from_fn_with_state(state.clone(), identify))
}

// 用户路由：需要 user 角色的令牌
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/user/translate", post(user::translate))
        .route("/user/usage", get(user::usage))
        .layer(from_fn_with_state(state.clone(), require_user))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(public_routes(&state))
        .merge(user_routes(&state))
        .layer(from_fn(log_errors));

    // 开发模式下允许任意来源
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
