pub mod dto;
pub mod handlers;

pub use handlers::DashboardState;
