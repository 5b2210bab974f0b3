pub mod error;
pub mod lead;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use lead::{Lead, LeadPatch, LeadStatus, LeadView};
pub use repositories::RepositoryProvider;
pub use user::{require_role, Caller, ManagerRef, User, UserChanges, UserRole};
