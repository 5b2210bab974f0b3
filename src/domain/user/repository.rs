//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

/// Field-level changes for a manager account. `None` means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    /// All users with role=manager, sorted by name ascending.
    async fn find_managers(&self) -> DomainResult<Vec<User>>;
    /// Insert a new account. Fails with `Conflict` when the email is
    /// already registered.
    async fn insert(&self, user: User) -> DomainResult<User>;
    async fn update(&self, user: User) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
