//! 测试用内存仓储

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{RepositoryError, UserRepositoryPort};
use crate::domain::user::{NewUser, User, UserId};

/// 内存 UserRepository，模拟 SQLite 的唯一约束错误
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    fn unique_email_violation() -> RepositoryError {
        RepositoryError::Database {
            code: "2067".to_string(),
            detail: "UNIQUE constraint failed: users.email".to_string(),
            column: None,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email() == &user.email) {
            return Err(Self::unique_email_violation());
        }
        let next_id = users.iter().map(|u| u.id().value()).max().unwrap_or(0) + 1;
        let created = User::restore(
            UserId::new(next_id),
            user.email.clone(),
            user.name.clone(),
            user.is_active,
        );
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users = self.users.lock().await.clone();
        users.sort_by_key(|u| u.id());
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().await;
        if users
            .iter()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(Self::unique_email_violation());
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user.id())))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        self.users.lock().await.retain(|u| u.id() != id);
        Ok(())
    }
}
