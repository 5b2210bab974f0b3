pub mod model;
pub mod repository;

pub use model::{Lead, LeadPatch, LeadStatus, LeadView};
pub use repository::LeadRepository;
