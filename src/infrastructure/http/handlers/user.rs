//! User HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::{CreateUser, DeleteUser, GetUser, ListUsers, UpdateUser};
use crate::infrastructure::http::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::infrastructure::http::envelope::Success;
use crate::infrastructure::http::error::Fault;
use crate::infrastructure::http::state::AppState;

type UserIdParam = Result<Path<i64>, PathRejection>;
/// 请求体先按任意 JSON 读取，白名单与类型检查由 DTO 完成
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// 列出所有用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Success<Vec<UserResponse>>, Fault> {
    let users = state.list_users_handler.handle(ListUsers).await?;
    Ok(Success::ok(users.into_iter().map(UserResponse::from).collect()))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    id: UserIdParam,
) -> Result<Success<UserResponse>, Fault> {
    let Path(user_id) = id?;
    let user = state.get_user_handler.handle(GetUser { user_id }).await?;
    Ok(Success::ok(user.into()))
}

/// 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: JsonBody<Value>,
) -> Result<Success<UserResponse>, Fault> {
    let Json(body) = body?;
    let req = CreateUserRequest::from_json(body)?;
    let command = CreateUser {
        email: req.email,
        name: req.name,
    };

    let user = state.create_user_handler.handle(command).await?;
    Ok(Success::created(user.into()))
}

/// 部分更新用户
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    id: UserIdParam,
    body: JsonBody<Value>,
) -> Result<Success<UserResponse>, Fault> {
    let Path(user_id) = id?;
    let Json(body) = body?;
    let req = UpdateUserRequest::from_json(body)?;
    let command = UpdateUser {
        user_id,
        email: req.email,
        name: req.name,
        is_active: req.is_active,
    };

    let user = state.update_user_handler.handle(command).await?;
    Ok(Success::ok(user.into()))
}

/// 删除用户，返回被删除的用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    id: UserIdParam,
) -> Result<Success<UserResponse>, Fault> {
    let Path(user_id) = id?;
    let user = state.delete_user_handler.handle(DeleteUser { user_id }).await?;
    Ok(Success::ok(user.into()))
}
