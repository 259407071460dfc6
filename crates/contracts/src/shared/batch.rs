use serde::{Deserialize, Serialize};

/// Body of `POST /projects/batch-delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<i64>,
}

/// Result of a batch delete. `failed_projects` is omitted by the server when empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchDeleteResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted_count: usize,
    #[serde(default)]
    pub failed_count: usize,
    #[serde(default)]
    pub failed_projects: Vec<i64>,
}

/// Plain `{ "message": "..." }` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
