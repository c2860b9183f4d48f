//! HTTP Routes
//!
//! API Endpoints:
//! - /ping          GET     健康检查
//! - /users         GET     列出所有用户
//! - /users         POST    创建用户
//! - /users/:id     GET     获取用户详情
//! - /users/:id     PATCH   部分更新用户
//! - /users/:id     DELETE  删除用户

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(user_routes())
        .fallback(handlers::route_not_found)
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
}
