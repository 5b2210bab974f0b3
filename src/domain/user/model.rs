//! User domain entity and the coarse role gate

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// User role
///
/// Closed set: a role never changes after the account is created, and
/// every authorization branch matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Full CRUD over leads and managers, dashboard access
    Employer,
    /// Read/limited-update of owned leads only
    Manager,
}

impl UserRole {
    /// Parse the wire representation used in JWT claims and the database.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employer" => Some(Self::Employer),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    pub fn is_employer(&self) -> bool {
        matches!(self, Self::Employer)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employer => write!(f, "employer"),
            Self::Manager => write!(f, "manager"),
        }
    }
}

/// Route-level role filter.
///
/// Pure check of the caller's role against an accepted set. Knows nothing
/// about individual resources; per-resource ownership rules live in the
/// services.
pub fn require_role(allowed: &[UserRole], actual: UserRole) -> DomainResult<()> {
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "role {} is not permitted for this operation",
            actual
        )))
    }
}

/// Resolved caller identity, produced by the auth middleware.
///
/// The services only ever see this pair; credential verification happens
/// upstream and an unresolved caller never reaches them.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub role: UserRole,
}

impl Caller {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// CRM user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Opaque bcrypt hash, never exposed through the API
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Redacted projection joined onto lead output.
    pub fn manager_ref(&self) -> ManagerRef {
        ManagerRef {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The only manager data ever exposed alongside a lead: name and email.
/// Credential hash and bookkeeping fields stay behind this projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_round_trip() {
        assert_eq!(UserRole::parse("employer"), Some(UserRole::Employer));
        assert_eq!(UserRole::parse("manager"), Some(UserRole::Manager));
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::Employer.to_string(), "employer");
        assert_eq!(UserRole::Manager.to_string(), "manager");
    }

    #[test]
    fn gate_permits_listed_role() {
        assert!(require_role(&[UserRole::Employer], UserRole::Employer).is_ok());
        assert!(require_role(&[UserRole::Employer, UserRole::Manager], UserRole::Manager).is_ok());
    }

    #[test]
    fn gate_denies_with_forbidden() {
        let err = require_role(&[UserRole::Employer], UserRole::Manager).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn manager_ref_redacts_credentials() {
        let user = User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@crm.test".into(),
            password_hash: "$2b$12$secret".into(),
            role: UserRole::Manager,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let r = user.manager_ref();
        assert_eq!(r.id, "u1");
        assert_eq!(r.name, "Alice");
        assert_eq!(r.email, "alice@crm.test");
    }
}
