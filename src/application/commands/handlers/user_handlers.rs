//! User Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateUser, DeleteUser, UpdateUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::user::{NewUser, User, UserId, UserPatch};

// ============================================================================
// CreateUser
// ============================================================================

/// CreateUser Handler
pub struct CreateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl CreateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: CreateUser) -> Result<User, ApplicationError> {
        let new_user = NewUser::parse(&command.email, &command.name)?;
        let user = self.user_repo.insert(&new_user).await?;

        tracing::info!(
            user_id = %user.id(),
            email = %user.email(),
            "User created"
        );

        Ok(user)
    }
}

// ============================================================================
// UpdateUser
// ============================================================================

/// UpdateUser Handler
pub struct UpdateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UpdateUser) -> Result<User, ApplicationError> {
        // 先校验输入，再查询，避免无效请求访问存储
        let patch = UserPatch::parse(
            command.email.as_deref(),
            command.name.as_deref(),
            command.is_active,
        )?;

        let mut user = self
            .user_repo
            .find_by_id(UserId::new(command.user_id))
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        user.apply(patch);
        // 查询与写入之间行可能已被并发删除
        self.user_repo.update(&user).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => ApplicationError::not_found("User", command.user_id),
            other => ApplicationError::from(other),
        })?;

        tracing::info!(user_id = %user.id(), "User updated");

        Ok(user)
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

/// DeleteUser Handler
pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    /// 删除用户，返回被删除的实体
    pub async fn handle(&self, command: DeleteUser) -> Result<User, ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(UserId::new(command.user_id))
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        self.user_repo.delete(user.id()).await?;

        tracing::info!(
            user_id = %user.id(),
            email = %user.email(),
            "User deleted"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::InMemoryUserRepository;
    use crate::domain::user::{Email, UserName};
    use async_trait::async_trait;

    fn create_command(email: &str, name: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_activates() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(repo);

        let user = handler.handle(create_command("a@b.com", "Ada")).await.unwrap();
        assert_eq!(user.id(), UserId::new(1));
        assert!(user.is_active());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_storage() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(repo.clone());

        let err = handler.handle(create_command("bad", "")).await.unwrap_err();
        match err {
            ApplicationError::ValidationError(violations) => {
                assert_eq!(violations, ["email must be an email", "name should not be empty"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_surfaces_storage_error() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(repo);

        handler.handle(create_command("a@b.com", "Ada")).await.unwrap();
        let err = handler.handle(create_command("a@b.com", "Eve")).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::RepositoryError(RepositoryError::Database { ref code, .. }) if code == "2067"
        ));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = UpdateUserHandler::new(repo);

        let err = handler
            .handle(UpdateUser {
                user_id: 42,
                email: None,
                name: Some("Grace".to_string()),
                is_active: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { id: 42, .. }));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = Arc::new(InMemoryUserRepository::new());
        CreateUserHandler::new(repo.clone())
            .handle(create_command("a@b.com", "Ada"))
            .await
            .unwrap();

        let user = UpdateUserHandler::new(repo)
            .handle(UpdateUser {
                user_id: 1,
                email: None,
                name: Some("Ada Lovelace".to_string()),
                is_active: Some(false),
            })
            .await
            .unwrap();

        assert_eq!(user.email().as_str(), "a@b.com");
        assert_eq!(user.name().as_str(), "Ada Lovelace");
        assert!(!user.is_active());
    }

    /// 查询时行仍存在，写入时已被删除
    struct VanishingUserRepository;

    #[async_trait]
    impl UserRepositoryPort for VanishingUserRepository {
        async fn insert(&self, _user: &NewUser) -> Result<User, RepositoryError> {
            unreachable!("insert is not used")
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
            Ok(Some(User::restore(
                id,
                Email::parse("a@b.com").unwrap(),
                UserName::parse("Ada").unwrap(),
                true,
            )))
        }

        async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn update(&self, user: &User) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound(format!("user {}", user.id())))
        }

        async fn delete(&self, _id: UserId) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_row_deleted_concurrently_is_not_found() {
        let handler = UpdateUserHandler::new(Arc::new(VanishingUserRepository));

        let err = handler
            .handle(UpdateUser {
                user_id: 1,
                email: None,
                name: Some("Grace".to_string()),
                is_active: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { resource_type: "User", id: 1 }));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        CreateUserHandler::new(repo.clone())
            .handle(create_command("a@b.com", "Ada"))
            .await
            .unwrap();

        let removed = DeleteUserHandler::new(repo.clone())
            .handle(DeleteUser { user_id: 1 })
            .await
            .unwrap();

        assert_eq!(removed.email().as_str(), "a@b.com");
        assert_eq!(repo.len().await, 0);
    }
}
