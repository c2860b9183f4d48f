//! User Commands

/// 创建用户命令
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
}

/// 更新用户命令（字段均可选）
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub user_id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// 删除用户命令
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: i64,
}
