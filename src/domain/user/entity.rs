//! User Context - Entity

use super::{Email, UserError, UserId, UserName};

/// 用户实体
///
/// 不变量:
/// - email 全局唯一（由存储层约束保证）
/// - 新用户默认处于激活状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: UserName,
    is_active: bool,
}

impl User {
    /// 从已持久化的数据重建
    pub fn restore(id: UserId, email: Email, name: UserName, is_active: bool) -> Self {
        Self {
            id,
            email,
            name,
            is_active,
        }
    }

    /// 合并部分更新，未提供的字段保持原值
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    // Getters
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// 待创建的用户（尚未分配 ID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub name: UserName,
    pub is_active: bool,
}

impl NewUser {
    /// 校验创建输入，收集所有违规项
    pub fn parse(email: &str, name: &str) -> Result<Self, UserError> {
        let mut violations = Vec::new();

        let email = Email::parse(email)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let name = UserName::parse(name)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        match (email, name) {
            (Some(email), Some(name)) => Ok(Self {
                email,
                name,
                is_active: true,
            }),
            _ => Err(UserError::Validation(violations)),
        }
    }
}

/// 部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<Email>,
    pub name: Option<UserName>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// 只校验实际提供的字段
    pub fn parse(
        email: Option<&str>,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Self, UserError> {
        let mut violations = Vec::new();
        let mut patch = Self {
            is_active,
            ..Self::default()
        };

        if let Some(raw) = email {
            match Email::parse(raw) {
                Ok(email) => patch.email = Some(email),
                Err(e) => violations.push(e.to_string()),
            }
        }
        if let Some(raw) = name {
            match UserName::parse(raw) {
                Ok(name) => patch.name = Some(name),
                Err(e) => violations.push(e.to_string()),
            }
        }

        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(UserError::Validation(violations))
        }
    }
}
