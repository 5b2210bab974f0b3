//! Manager DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::UserChanges;
use crate::domain::ManagerRef;

/// A manager account with credentials redacted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ManagerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<ManagerRef> for ManagerResponse {
    fn from(m: ManagerRef) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManagerRequest {
    #[validate(length(max = 100, message = "name is too long"))]
    pub name: Option<String>,
    #[validate(email(message = "a valid email is required"))]
    pub email: Option<String>,
}

impl From<UpdateManagerRequest> for UserChanges {
    fn from(req: UpdateManagerRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}
