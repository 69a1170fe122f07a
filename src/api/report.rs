use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde_json::json;

use crate::model::attendance::{AttendanceStats, AttendanceStatus};
use crate::store::Store;

/// Today's attendance statistics
#[utoipa::path(
    get,
    path = "/reports/stats/today",
    responses(
        (status = 200, description = "Aggregate counts for today", body = AttendanceStats)
    ),
    tag = "Reports"
)]
pub async fn today_stats(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(store.stats_on(Utc::now().date_naive()))
}

/// Students not yet marked today
#[utoipa::path(
    get,
    path = "/reports/missing-today",
    responses(
        (status = 200, description = "Students with no attendance record today", body = Object, example = json!({
            "date": "2026-01-01",
            "missing_students": [],
            "total_missing": 0
        }))
    ),
    tag = "Reports"
)]
pub async fn missing_today(store: web::Data<Store>) -> impl Responder {
    let today = Utc::now().date_naive();
    let missing = store.missing_on(today);
    let total_missing = missing.len();

    HttpResponse::Ok().json(json!({
        "date": today,
        "missing_students": missing,
        "total_missing": total_missing
    }))
}

/// General summary
#[utoipa::path(
    get,
    path = "/reports/summary",
    responses(
        (status = 200, description = "System totals and today's breakdown", body = Object, example = json!({
            "system": {
                "total_students": 10,
                "total_attendance_records": 42,
                "current_date": "2026-01-01"
            },
            "today": {
                "records": 8,
                "present": 6,
                "absent": 1,
                "late": 1
            }
        }))
    ),
    tag = "Reports"
)]
pub async fn summary(store: web::Data<Store>) -> impl Responder {
    let today = Utc::now().date_naive();
    let records = store.records_on(today);

    let count = |status: AttendanceStatus| records.iter().filter(|r| r.status == status).count();

    HttpResponse::Ok().json(json!({
        "system": {
            "total_students": store.student_count(),
            "total_attendance_records": store.record_count(),
            "current_date": today
        },
        "today": {
            "records": records.len(),
            "present": count(AttendanceStatus::Present),
            "absent": count(AttendanceStatus::Absent),
            "late": count(AttendanceStatus::Late)
        }
    }))
}
