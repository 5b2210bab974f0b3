pub mod services;

pub use services::{DashboardService, LeadService, LeadStats, ManagerService, NewLead};
