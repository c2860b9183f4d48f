//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod user_repository;

#[cfg(test)]
pub(crate) mod testing;

pub use user_repository::{RepositoryError, UserRepositoryPort};
