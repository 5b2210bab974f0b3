//! Lead repository interface

use async_trait::async_trait;

use super::model::{Lead, LeadStatus};
use crate::domain::user::ManagerRef;
use crate::domain::DomainResult;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Lead>>;
    /// All leads, newest first, with the owning manager's redacted
    /// projection joined on. The join is `None` only when the manager
    /// record has been deleted out from under the lead.
    async fn find_all_with_manager(&self) -> DomainResult<Vec<(Lead, Option<ManagerRef>)>>;
    /// Leads owned by one manager, newest first, no join.
    async fn find_by_manager(&self, manager_id: &str) -> DomainResult<Vec<Lead>>;
    async fn insert(&self, lead: Lead) -> DomainResult<Lead>;
    async fn update(&self, lead: Lead) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    async fn count_by_status(&self, status: LeadStatus) -> DomainResult<u64>;
}
