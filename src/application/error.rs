//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::user::UserError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到（id 仅用于日志，不出现在消息中）
    #[error("{resource_type} not found")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// 验证错误
    #[error("Validation error: {}", .0.join(", "))]
    ValidationError(Vec<String>),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(violations: Vec<String>) -> Self {
        Self::ValidationError(violations)
    }
}

impl From<UserError> for ApplicationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(violations) => Self::validation(violations),
        }
    }
}
