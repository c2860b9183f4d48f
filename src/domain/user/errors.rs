//! User Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    /// 一条或多条输入规则未通过，保留每条违规描述
    #[error("用户数据校验失败: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl UserError {
    pub fn violations(&self) -> &[String] {
        match self {
            UserError::Validation(violations) => violations,
        }
    }
}
