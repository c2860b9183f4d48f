//! User Queries

/// 获取用户详情查询
#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: i64,
}

/// 列出所有用户查询
#[derive(Debug, Clone)]
pub struct ListUsers;
