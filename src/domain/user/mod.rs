pub mod model;
pub mod repository;

pub use model::{require_role, Caller, ManagerRef, User, UserRole};
pub use repository::{UserChanges, UserRepository};
