//! Lead access service
//!
//! The authorization and business layer for lead CRUD. The route-level
//! role gate has already let the caller through by the time these run;
//! everything per-resource (ownership, manager-reference integrity,
//! partial-update semantics) is decided here.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::user::require_role;
use crate::domain::{
    Caller, DomainError, DomainResult, Lead, LeadPatch, LeadStatus, LeadView, RepositoryProvider,
    User, UserRole,
};

/// Input for lead creation. The employer explicitly assigns ownership via
/// `manager_id`; there is no caller-is-owner default.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub value: Option<i64>,
    pub notes: Option<String>,
    pub manager_id: String,
}

pub struct LeadService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LeadService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// List leads visible to the caller.
    ///
    /// Employers see every lead with the owning manager joined; managers
    /// see only their own leads, unfiltered by status and without the
    /// join they do not need.
    pub async fn list(&self, caller: &Caller) -> DomainResult<Vec<LeadView>> {
        match caller.role {
            UserRole::Employer => {
                let rows = self.repos.leads().find_all_with_manager().await?;
                Ok(rows
                    .into_iter()
                    .map(|(lead, manager)| LeadView { lead, manager })
                    .collect())
            }
            UserRole::Manager => {
                let leads = self.repos.leads().find_by_manager(&caller.id).await?;
                Ok(leads
                    .into_iter()
                    .map(|lead| LeadView {
                        lead,
                        manager: None,
                    })
                    .collect())
            }
        }
    }

    /// Fetch one lead. Managers may only see leads they own, checked here
    /// even though the route gate already admitted the role.
    pub async fn get(&self, caller: &Caller, id: &str) -> DomainResult<LeadView> {
        let lead = self
            .repos
            .leads()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("lead", id))?;

        match caller.role {
            UserRole::Employer => {}
            UserRole::Manager => {
                if !lead.is_owned_by(&caller.id) {
                    return Err(DomainError::Forbidden(
                        "lead is owned by another manager".into(),
                    ));
                }
            }
        }

        let manager = self.manager_join(&lead).await?;
        Ok(LeadView { lead, manager })
    }

    /// Create a lead. Employer-only; the supplied manager id must resolve
    /// to an existing user with role=manager.
    pub async fn create(&self, caller: &Caller, input: NewLead) -> DomainResult<LeadView> {
        require_role(&[UserRole::Employer], caller.role)?;

        if input.name.is_empty() || input.email.is_empty() {
            return Err(DomainError::Validation(
                "name and email are required".into(),
            ));
        }
        let value = input.value.unwrap_or(0);
        if value < 0 {
            return Err(DomainError::Validation("value must be non-negative".into()));
        }

        let manager = self.resolve_manager(&input.manager_id).await?;

        let now = Utc::now();
        let lead = Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            status: LeadStatus::default(),
            value,
            notes: input.notes,
            manager_id: manager.id.clone(),
            created_at: now,
            updated_at: now,
        };

        let saved = self.repos.leads().insert(lead).await?;
        Ok(LeadView {
            lead: saved,
            manager: Some(manager.manager_ref()),
        })
    }

    /// Partially update a lead.
    ///
    /// Employers may change any field of any lead, including reassigning
    /// the owner (validated like creation). Managers may change any field
    /// except the owner, and only on leads they own.
    pub async fn update(&self, caller: &Caller, id: &str, patch: LeadPatch) -> DomainResult<LeadView> {
        let mut lead = self
            .repos
            .leads()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("lead", id))?;

        match caller.role {
            UserRole::Employer => {}
            UserRole::Manager => {
                if !lead.is_owned_by(&caller.id) {
                    return Err(DomainError::Forbidden(
                        "lead is owned by another manager".into(),
                    ));
                }
                if patch.reassigns_manager() {
                    return Err(DomainError::Forbidden(
                        "ownership reassignment is an employer-only operation".into(),
                    ));
                }
            }
        }

        if let Some(value) = patch.value {
            if value < 0 {
                return Err(DomainError::Validation("value must be non-negative".into()));
            }
        }

        // Read-then-write: the manager could be deleted between this check
        // and the update below. Single-document writes are the unit of
        // atomicity here, so the window is accepted.
        if let Some(new_manager_id) = patch.manager_id.as_deref() {
            let manager = self.resolve_manager(new_manager_id).await?;
            lead.manager_id = manager.id;
        }

        lead.apply(&patch, Utc::now());
        self.repos.leads().update(lead.clone()).await?;

        let manager = self.manager_join(&lead).await?;
        Ok(LeadView { lead, manager })
    }

    /// Delete a lead. Employer-only: the owning manager is refused too.
    pub async fn delete(&self, caller: &Caller, id: &str) -> DomainResult<()> {
        self.repos
            .leads()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("lead", id))?;

        require_role(&[UserRole::Employer], caller.role)?;

        self.repos.leads().delete(id).await
    }

    /// Resolve a manager id, failing with NotFound("manager") when the id
    /// is unknown or belongs to a non-manager user.
    async fn resolve_manager(&self, id: &str) -> DomainResult<User> {
        let user = self.repos.users().find_by_id(id).await?;
        match user {
            Some(user) if user.role == UserRole::Manager => Ok(user),
            _ => Err(DomainError::not_found("manager", id)),
        }
    }

    async fn manager_join(&self, lead: &Lead) -> DomainResult<Option<crate::domain::ManagerRef>> {
        let user = self.repos.users().find_by_id(&lead.manager_id).await?;
        Ok(user.map(|u| u.manager_ref()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{employer, lead_for, manager, InMemoryStore};

    fn service(store: Arc<InMemoryStore>) -> LeadService {
        LeadService::new(store)
    }

    fn seeded_store() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.seed_user(employer("e1"));
        store.seed_user(manager("m1", "Mira"));
        store.seed_user(manager("m2", "Noah"));
        store
    }

    #[tokio::test]
    async fn employer_lists_all_leads_with_manager_join() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        store.seed_lead(lead_for("l2", "m2"));
        let svc = service(store);

        let views = svc
            .list(&Caller::new("e1", UserRole::Employer))
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.manager.is_some()));
    }

    #[tokio::test]
    async fn manager_lists_only_owned_leads() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        store.seed_lead(lead_for("l2", "m2"));
        store.seed_lead(lead_for("l3", "m1"));
        let svc = service(store);

        let views = svc
            .list(&Caller::new("m1", UserRole::Manager))
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.lead.manager_id == "m1"));
        assert!(views.iter().all(|v| v.manager.is_none()));
    }

    #[tokio::test]
    async fn get_unknown_lead_is_not_found_for_any_role() {
        let store = seeded_store();
        let svc = service(store);

        for caller in [
            Caller::new("e1", UserRole::Employer),
            Caller::new("m1", UserRole::Manager),
        ] {
            let err = svc.get(&caller, "missing").await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { entity: "lead", .. }));
        }
    }

    #[tokio::test]
    async fn manager_cannot_get_foreign_lead() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let err = svc
            .get(&Caller::new("m2", UserRole::Manager), "l1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn employer_gets_any_lead_with_join() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let view = svc
            .get(&Caller::new("e1", UserRole::Employer), "l1")
            .await
            .unwrap();
        let joined = view.manager.unwrap();
        assert_eq!(joined.id, "m1");
        assert_eq!(joined.name, "Mira");
    }

    fn new_lead(manager_id: &str) -> NewLead {
        NewLead {
            name: "ABC".into(),
            email: "a@b.com".into(),
            phone: None,
            company: None,
            value: None,
            notes: None,
            manager_id: manager_id.into(),
        }
    }

    #[tokio::test]
    async fn create_defaults_status_value_and_timestamps() {
        let svc = service(seeded_store());

        let view = svc
            .create(&Caller::new("e1", UserRole::Employer), new_lead("m1"))
            .await
            .unwrap();
        assert_eq!(view.lead.status, LeadStatus::InProgress);
        assert_eq!(view.lead.value, 0);
        assert_eq!(view.lead.created_at, view.lead.updated_at);
        assert_eq!(view.lead.manager_id, "m1");
    }

    #[tokio::test]
    async fn create_rejects_manager_caller() {
        let svc = service(seeded_store());

        let err = svc
            .create(&Caller::new("m1", UserRole::Manager), new_lead("m1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_with_unknown_manager_is_not_found() {
        let svc = service(seeded_store());

        let err = svc
            .create(&Caller::new("e1", UserRole::Employer), new_lead("ghost"))
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

    #[tokio::test]
    async fn create_with_employer_id_as_manager_is_not_found() {
        let svc = service(seeded_store());

        // "e1" exists but has role employer, so it cannot own leads
        let err = svc
            .create(&Caller::new("e1", UserRole::Employer), new_lead("e1"))
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

    #[tokio::test]
    async fn create_rejects_negative_value() {
        let svc = service(seeded_store());

        let mut input = new_lead("m1");
        input.value = Some(-5);
        let err = svc
            .create(&Caller::new("e1", UserRole::Employer), input)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn owner_updates_value_to_explicit_zero() {
        let store = seeded_store();
        let mut lead = lead_for("l1", "m1");
        lead.value = 900;
        store.seed_lead(lead);
        let svc = service(store);

        let patch = LeadPatch {
            value: Some(0),
            ..Default::default()
        };
        let view = svc
            .update(&Caller::new("m1", UserRole::Manager), "l1", patch)
            .await
            .unwrap();
        assert_eq!(view.lead.value, 0);
    }

    #[tokio::test]
    async fn omitted_value_is_left_unchanged() {
        let store = seeded_store();
        let mut lead = lead_for("l1", "m1");
        lead.value = 900;
        store.seed_lead(lead);
        let svc = service(store);

        let patch = LeadPatch {
            notes: Some("called back".into()),
            ..Default::default()
        };
        let view = svc
            .update(&Caller::new("m1", UserRole::Manager), "l1", patch)
            .await
            .unwrap();
        assert_eq!(view.lead.value, 900);
        assert_eq!(view.lead.notes.as_deref(), Some("called back"));
    }

    #[tokio::test]
    async fn manager_cannot_update_foreign_lead() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let err = svc
            .update(
                &Caller::new("m2", UserRole::Manager),
                "l1",
                LeadPatch::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn manager_cannot_reassign_own_lead() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let patch = LeadPatch {
            manager_id: Some("m2".into()),
            ..Default::default()
        };
        let err = svc
            .update(&Caller::new("m1", UserRole::Manager), "l1", patch)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn employer_reassignment_moves_visibility() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let patch = LeadPatch {
            manager_id: Some("m2".into()),
            ..Default::default()
        };
        let view = svc
            .update(&Caller::new("e1", UserRole::Employer), "l1", patch)
            .await
            .unwrap();
        assert_eq!(view.lead.manager_id, "m2");

        // former owner locked out, new owner admitted
        let err = svc
            .get(&Caller::new("m1", UserRole::Manager), "l1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(svc.get(&Caller::new("m2", UserRole::Manager), "l1").await.is_ok());
    }

    #[tokio::test]
    async fn employer_reassignment_to_non_manager_is_not_found() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let patch = LeadPatch {
            manager_id: Some("e1".into()),
            ..Default::default()
        };
        let err = svc
            .update(&Caller::new("e1", UserRole::Employer), "l1", patch)
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

    #[tokio::test]
    async fn update_refreshes_updated_at() {
        let store = seeded_store();
        let seeded = lead_for("l1", "m1");
        let before = seeded.updated_at;
        store.seed_lead(seeded);
        let svc = service(store);

        let view = svc
            .update(
                &Caller::new("e1", UserRole::Employer),
                "l1",
                LeadPatch::default(),
            )
            .await
            .unwrap();
        assert!(view.lead.updated_at >= before);
        assert_ne!(view.lead.updated_at, before);
    }

    #[tokio::test]
    async fn manager_delete_is_forbidden_even_for_owner() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store);

        let err = svc
            .delete(&Caller::new("m1", UserRole::Manager), "l1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_unknown_lead_is_not_found() {
        let svc = service(seeded_store());

        let err = svc
            .delete(&Caller::new("e1", UserRole::Employer), "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "lead", .. }));
    }

    #[tokio::test]
    async fn employer_delete_removes_lead() {
        let store = seeded_store();
        store.seed_lead(lead_for("l1", "m1"));
        let svc = service(store.clone());

        svc.delete(&Caller::new("e1", UserRole::Employer), "l1")
            .await
            .unwrap();
        let err = svc
            .get(&Caller::new("e1", UserRole::Employer), "l1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
