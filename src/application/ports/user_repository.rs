//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserId};

/// Repository 错误
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// 存储引擎报告的错误，保留引擎的错误码与原始描述
    #[error("Database error [{code}]: {detail}")]
    Database {
        code: String,
        detail: String,
        column: Option<String>,
    },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 插入新用户，返回分配了 ID 的实体
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// 获取所有用户（按 ID 升序）
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// 覆盖保存已有用户
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    /// 删除用户
    async fn delete(&self, id: UserId) -> Result<(), RepositoryError>;
}
