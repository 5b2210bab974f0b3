//! Lead DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::NewLead;
use crate::domain::{DomainError, DomainResult, LeadPatch, LeadStatus, LeadView, ManagerRef};

/// Redacted owning-manager join: name and email only.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ManagerRefDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<ManagerRef> for ManagerRefDto {
    fn from(m: ManagerRef) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeadResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub value: i64,
    pub notes: Option<String>,
    pub manager_id: String,
    /// Present on employer reads; omitted where the join is skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerRefDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeadView> for LeadResponse {
    fn from(view: LeadView) -> Self {
        let lead = view.lead;
        Self {
            id: lead.id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            company: lead.company,
            status: lead.status.to_string(),
            value: lead.value,
            notes: lead.notes,
            manager_id: lead.manager_id,
            manager: view.manager.map(Into::into),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, max = 100, message = "lead name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[validate(range(min = 0, message = "value must be non-negative"))]
    pub value: Option<i64>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "manager_id is required"))]
    pub manager_id: String,
}

impl From<CreateLeadRequest> for NewLead {
    fn from(req: CreateLeadRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            value: req.value,
            notes: req.notes,
            manager_id: req.manager_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// One of IN_PROGRESS, COMPLETED, CANCELED
    pub status: Option<String>,
    #[validate(range(min = 0, message = "value must be non-negative"))]
    pub value: Option<i64>,
    pub notes: Option<String>,
    pub manager_id: Option<String>,
}

impl UpdateLeadRequest {
    /// Convert to a domain patch, rejecting unknown status strings.
    pub fn into_patch(self) -> DomainResult<LeadPatch> {
        let status = match self.status.as_deref() {
            None => None,
            Some(s) => Some(LeadStatus::parse(s).ok_or_else(|| {
                DomainError::Validation(format!("unknown lead status: {}", s))
            })?),
        };

        Ok(LeadPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            status,
            value: self.value,
            notes: self.notes,
            manager_id: self.manager_id,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
