use chrono::{DateTime, Utc};

use crate::services::analytics::DatasetDescription;
use crate::services::table::Table;

#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Per-token session context. The upload is replaced wholesale by the next
/// one, never mutated field-by-field.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub upload: Option<UploadState>,
}

#[derive(Debug, Clone)]
pub struct UploadState {
    pub description: DatasetDescription,
    pub table: Table,
}
