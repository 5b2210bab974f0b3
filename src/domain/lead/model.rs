//! Lead domain entity

use chrono::{DateTime, Utc};

/// Lead pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatus {
    InProgress,
    Completed,
    Canceled,
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl LeadStatus {
    /// Parse the wire/database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "CANCELED" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// Sales prospect record, owned by exactly one manager at all times.
///
/// The `manager_id` reference is validated against the user store on every
/// write; there is no database-level foreign key backing it.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    /// Monetary value in the smallest currency unit, never negative
    pub value: i64,
    pub notes: Option<String>,
    /// Id of the owning manager (a user with role=manager)
    pub manager_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Ownership predicate shared by the get and update paths.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.manager_id == user_id
    }

    /// Apply a partial update in place and refresh `updated_at`.
    ///
    /// String fields change only when present and non-empty; `value`
    /// changes whenever present, an explicit 0 included. Manager
    /// reassignment is not handled here: the caller validates the new
    /// manager first and applies it separately.
    pub fn apply(&mut self, patch: &LeadPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name.as_deref().filter(|s| !s.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(email) = patch.email.as_deref().filter(|s| !s.is_empty()) {
            self.email = email.to_string();
        }
        if let Some(phone) = patch.phone.as_deref().filter(|s| !s.is_empty()) {
            self.phone = Some(phone.to_string());
        }
        if let Some(company) = patch.company.as_deref().filter(|s| !s.is_empty()) {
            self.company = Some(company.to_string());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(notes) = patch.notes.as_deref().filter(|s| !s.is_empty()) {
            self.notes = Some(notes.to_string());
        }
        self.updated_at = now;
    }
}

/// Partial-update carrier for a lead. `None` means "field absent".
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<LeadStatus>,
    pub value: Option<i64>,
    pub notes: Option<String>,
    /// Ownership reassignment, employer-only
    pub manager_id: Option<String>,
}

impl LeadPatch {
    pub fn reassigns_manager(&self) -> bool {
        self.manager_id.is_some()
    }
}

/// Lead read model: the lead plus the redacted owning-manager join.
/// `manager` is `None` on paths that skip the join (a manager listing
/// their own leads already knows the owner).
#[derive(Debug, Clone)]
pub struct LeadView {
    pub lead: Lead,
    pub manager: Option<crate::domain::user::ManagerRef>,
}

// ── Tests ──────────────────────────────────────────────────────
