//! # Lead CRM Service
//!
//! Role-based CRM backend for managing sales leads.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, roles and repository traits
//! - **application**: Business logic: lead, manager and dashboard services
//! - **infrastructure**: External concerns (database, password hashing, JWT)
//! - **interfaces**: REST API with Swagger documentation
//!
//! Two roles exist: `employer` (full access, manager administration,
//! dashboard) and `manager` (works only with leads assigned to them).

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::create_api_router;
