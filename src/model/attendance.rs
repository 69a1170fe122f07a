use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Present
    }
}

/// One mark per student per calendar day; re-marking updates in place.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "c6b5f0a2-1b4e-4a7d-9a30-5b6c1d2e3f40", value_type = String)]
    pub id: Uuid,
    #[schema(example = "2024001", value_type = String)]
    pub student_code: String,
    /// Student name as it was when the mark was taken.
    #[schema(example = "Ana García López", value_type = String)]
    pub full_name: String,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "2026-01-01T08:05:00Z", format = "date-time", value_type = String)]
    pub recorded_at: DateTime<Utc>,
    #[schema(example = "arrived after the bell", value_type = Option<String>)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceRequest {
    #[schema(example = "2024001", value_type = String)]
    pub student_code: String,
    /// Defaults to `present` when omitted.
    #[serde(default)]
    #[schema(example = "late")]
    pub status: AttendanceStatus,
    #[schema(example = "arrived after the bell", value_type = Option<String>)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "total_students": 10,
    "present": 7,
    "absent": 2,
    "late": 1,
    "attendance_rate": 70.0
}))]
pub struct AttendanceStats {
    pub total_students: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    /// Percentage of registered students marked present, rounded to 2 decimals.
    pub attendance_rate: f64,
}
