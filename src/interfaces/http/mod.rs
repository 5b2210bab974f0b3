//! HTTP REST API interfaces
//!
//! - `middleware`: Authentication middleware (JWT bearer + role gate)
//! - `modules`: Request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use common::{ApiError, ApiResponse, ValidatedJson};
pub use router::create_api_router;
