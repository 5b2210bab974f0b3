//! Repository provider interface

use crate::domain::lead::LeadRepository;
use crate::domain::user::UserRepository;

/// Bundles the per-aggregate repositories behind one injection point.
///
/// Services hold an `Arc<dyn RepositoryProvider>`, which keeps them
/// independent of the storage backend and lets tests substitute in-memory
/// fakes.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn leads(&self) -> &dyn LeadRepository;
}
