//! Application services
//!
//! - `lead`: role/ownership authorization and CRUD for leads
//! - `manager`: manager directory queries and employer-only mutations
//! - `dashboard`: employer-facing lead statistics

pub mod dashboard;
pub mod lead;
pub mod manager;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::{DashboardService, LeadStats};
pub use lead::{LeadService, NewLead};
pub use manager::ManagerService;
