//! In-memory repositories for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::lead::LeadRepository;
use crate::domain::user::UserRepository;
use crate::domain::{
    DomainError, DomainResult, Lead, LeadStatus, ManagerRef, RepositoryProvider, User, UserRole,
};

/// In-memory store standing in for the database in service tests.
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    leads: Mutex<Vec<Lead>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(Vec::new()),
            leads: Mutex::new(Vec::new()),
        })
    }

    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn seed_lead(&self, lead: Lead) {
        self.leads.lock().unwrap().push(lead);
    }
}

impl RepositoryProvider for InMemoryStore {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn leads(&self) -> &dyn LeadRepository {
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_managers(&self) -> DomainResult<Vec<User>> {
        let mut managers: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == UserRole::Manager)
            .cloned()
            .collect();
        managers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(managers)
    }

    async fn insert(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DomainError::not_found("user", user.id.clone()))?;
        *slot = user;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::not_found("user", id));
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

#[async_trait]
impl LeadRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Lead>> {
        Ok(self.leads.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn find_all_with_manager(&self) -> DomainResult<Vec<(Lead, Option<ManagerRef>)>> {
        let users = self.users.lock().unwrap().clone();
        let mut leads = self.leads.lock().unwrap().clone();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads
            .into_iter()
            .map(|lead| {
                let manager = users
                    .iter()
                    .find(|u| u.id == lead.manager_id)
                    .map(User::manager_ref);
                (lead, manager)
            })
            .collect())
    }

    async fn find_by_manager(&self, manager_id: &str) -> DomainResult<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.manager_id == manager_id)
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn insert(&self, lead: Lead) -> DomainResult<Lead> {
        self.leads.lock().unwrap().push(lead.clone());
        Ok(lead)
    }

    async fn update(&self, lead: Lead) -> DomainResult<()> {
        let mut leads = self.leads.lock().unwrap();
        let slot = leads
            .iter_mut()
            .find(|l| l.id == lead.id)
            .ok_or_else(|| DomainError::not_found("lead", lead.id.clone()))?;
        *slot = lead;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut leads = self.leads.lock().unwrap();
        let before = leads.len();
        leads.retain(|l| l.id != id);
        if leads.len() == before {
            return Err(DomainError::not_found("lead", id));
        }
        Ok(())
    }

    async fn count_by_status(&self, status: LeadStatus) -> DomainResult<u64> {
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == status)
            .count() as u64)
    }
}

// ── Fixtures ───────────────────────────────────────────────────

pub fn manager(id: &str, name: &str) -> User {
    let now = Utc::now();
    User {
        id: id.into(),
        name: name.into(),
        email: format!("{}@crm.test", id),
        password_hash: "$2b$12$fixture".into(),
        role: UserRole::Manager,
        created_at: now,
        updated_at: now,
    }
}

pub fn employer(id: &str) -> User {
    User {
        role: UserRole::Employer,
        ..manager(id, "Boss")
    }
}

pub fn lead_for(id: &str, manager_id: &str) -> Lead {
    let now = Utc::now();
    Lead {
        id: id.into(),
        name: "ABC".into(),
        email: "a@b.com".into(),
        phone: None,
        company: None,
        status: LeadStatus::InProgress,
        value: 0,
        notes: None,
        manager_id: manager_id.into(),
        created_at: now,
        updated_at: now,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_insert_is_a_conflict() {
        let store = InMemoryStore::new();
        store.users().insert(manager("m1", "Mira")).await.unwrap();

        let mut duplicate = manager("m2", "Noah");
        duplicate.email = "m1@crm.test".into();
        let err = store.users().insert(duplicate).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
