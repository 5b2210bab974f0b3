//! Manager directory service

use std::sync::Arc;

use chrono::Utc;

use crate::domain::user::require_role;
use crate::domain::{
    Caller, DomainError, DomainResult, ManagerRef, RepositoryProvider, User, UserChanges, UserRole,
};

pub struct ManagerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ManagerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// All manager accounts, redacted to name/email, sorted by name.
    pub async fn list(&self) -> DomainResult<Vec<ManagerRef>> {
        let managers = self.repos.users().find_managers().await?;
        Ok(managers.iter().map(User::manager_ref).collect())
    }

    /// Update a manager's name and/or email. Employer-only; fields follow
    /// the present-and-non-empty rule.
    pub async fn update(
        &self,
        caller: &Caller,
        id: &str,
        changes: UserChanges,
    ) -> DomainResult<ManagerRef> {
        require_role(&[UserRole::Employer], caller.role)?;

        let mut manager = self.resolve_manager(id).await?;
        if let Some(name) = changes.name.as_deref().filter(|s| !s.is_empty()) {
            manager.name = name.to_string();
        }
        if let Some(email) = changes.email.as_deref().filter(|s| !s.is_empty()) {
            manager.email = email.to_string();
        }
        manager.updated_at = Utc::now();

        self.repos.users().update(manager.clone()).await?;
        Ok(manager.manager_ref())
    }

    /// Delete a manager account. Employer-only.
    ///
    /// Leads still referencing the manager are left in place with a
    /// dangling owner reference; they stay visible to employers and can
    /// be reassigned afterwards.
    pub async fn delete(&self, caller: &Caller, id: &str) -> DomainResult<()> {
        require_role(&[UserRole::Employer], caller.role)?;

        let manager = self.resolve_manager(id).await?;
        self.repos.users().delete(&manager.id).await
    }

    async fn resolve_manager(&self, id: &str) -> DomainResult<User> {
        let user = self.repos.users().find_by_id(id).await?;
        match user {
            Some(user) if user.role == UserRole::Manager => Ok(user),
            _ => Err(DomainError::not_found("manager", id)),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{employer, lead_for, manager, InMemoryStore};

    fn seeded() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.seed_user(employer("e1"));
        store.seed_user(manager("m2", "Zoe"));
        store.seed_user(manager("m1", "Ana"));
        store
    }

    #[tokio::test]
    async fn list_is_redacted_and_sorted_by_name() {
        let svc = ManagerService::new(seeded());

        let managers = svc.list().await.unwrap();
        let names: Vec<&str> = managers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zoe"]);
        // employer account is not a manager
        assert!(managers.iter().all(|m| m.id != "e1"));
    }

    #[tokio::test]
    async fn update_applies_supplied_fields_only() {
        let svc = ManagerService::new(seeded());

        let changes = UserChanges {
            name: Some("Anabel".into()),
            email: None,
        };
        let updated = svc
            .update(&Caller::new("e1", UserRole::Employer), "m1", changes)
            .await
            .unwrap();
        assert_eq!(updated.name, "Anabel");
        assert_eq!(updated.email, "m1@crm.test");
    }

    #[tokio::test]
    async fn update_requires_employer() {
        let svc = ManagerService::new(seeded());

        let err = svc
            .update(
                &Caller::new("m1", UserRole::Manager),
                "m1",
                UserChanges::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn update_unknown_or_non_manager_is_not_found() {
        let svc = ManagerService::new(seeded());
        let caller = Caller::new("e1", UserRole::Employer);

        for id in ["ghost", "e1"] {
            let err = svc
                .update(&caller, id, UserChanges::default())
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DomainError::NotFound {
                    entity: "manager",
                    ..
                }
            ));
        }
    }

    #[tokio::test]
    async fn delete_removes_manager_but_keeps_their_leads() {
        let store = seeded();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = ManagerService::new(store.clone());

        svc.delete(&Caller::new("e1", UserRole::Employer), "m1")
            .await
            .unwrap();

        assert!(svc.list().await.unwrap().iter().all(|m| m.id != "m1"));
        // the lead survives with a dangling owner reference
        use crate::domain::lead::LeadRepository;
        let orphan = store.find_by_id("l1").await.unwrap().unwrap();
        assert_eq!(orphan.manager_id, "m1");
    }

    #[tokio::test]
    async fn delete_requires_employer() {
        let svc = ManagerService::new(seeded());

        let err = svc
            .delete(&Caller::new("m2", UserRole::Manager), "m1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
