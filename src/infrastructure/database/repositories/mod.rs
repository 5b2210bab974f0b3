pub mod lead_repository;
pub mod repository_provider;
pub mod user_repository;

pub use lead_repository::SeaOrmLeadRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;
