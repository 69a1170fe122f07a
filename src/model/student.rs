use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Student {
    #[schema(example = "2024001", value_type = String)]
    pub student_code: String,
    #[schema(example = "Ana García López", value_type = String)]
    pub full_name: String,
    /// Set server-side at registration when omitted from the request body.
    #[serde(default = "Utc::now")]
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentUpdate {
    #[schema(example = "Ana García de la Torre", value_type = String)]
    pub full_name: Option<String>,
}
