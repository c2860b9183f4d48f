//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::{GetUser, ListUsers};
use crate::domain::user::{User, UserId};

/// GetUser Handler
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUser) -> Result<User, ApplicationError> {
        self.user_repo
            .find_by_id(UserId::new(query.user_id))
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", query.user_id))
    }
}

/// ListUsers Handler
pub struct ListUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl ListUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, _query: ListUsers) -> Result<Vec<User>, ApplicationError> {
        Ok(self.user_repo.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::InMemoryUserRepository;
    use crate::domain::user::NewUser;

    #[tokio::test]
    async fn test_get_user_not_found() {
        let handler = GetUserHandler::new(Arc::new(InMemoryUserRepository::new()));
        let err = handler.handle(GetUser { user_id: 7 }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "User", id: 7 }));
    }

    #[tokio::test]
    async fn test_list_users_in_id_order() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.insert(&NewUser::parse("a@b.com", "Ada").unwrap()).await.unwrap();
        repo.insert(&NewUser::parse("g@h.com", "Grace").unwrap()).await.unwrap();

        let users = ListUsersHandler::new(repo).handle(ListUsers).await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name().as_str()).collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }
}
