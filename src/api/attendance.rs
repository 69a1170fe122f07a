use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde_json::json;

use crate::store::Store;
use crate::model::attendance::{AttendanceRecord, AttendanceRequest};

/// Mark attendance
///
/// Upserts today's record for the student: marking twice on the same day
/// updates the existing record instead of creating a duplicate.
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceRecord),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    store: web::Data<Store>,
    payload: web::Json<AttendanceRequest>,
) -> impl Responder {
    let now = Utc::now();

    match store.mark_attendance(payload.into_inner(), now.date_naive(), now) {
        Ok(record) => {
            tracing::info!(
                student_code = %record.student_code,
                status = %record.status,
                "Attendance marked"
            );
            HttpResponse::Ok().json(record)
        }
        Err(_) => HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })),
    }
}

/// Today's attendance
#[utoipa::path(
    get,
    path = "/attendance/today",
    responses(
        (status = 200, description = "Attendance records for today", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn today_attendance(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(store.records_on(Utc::now().date_naive()))
}

/// Attendance by date
#[utoipa::path(
    get,
    path = "/attendance/date/{date}",
    params(
        ("date", Path, description = "Calendar day, ISO format YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Attendance records for the given day", body = [AttendanceRecord]),
        (status = 400, description = "Unparseable date", body = Object, example = json!({
            "message": "Invalid date, expected YYYY-MM-DD"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_date(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let raw = path.into_inner();

    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => HttpResponse::Ok().json(store.records_on(date)),
        Err(_) => HttpResponse::BadRequest().json(json!({
            "message": "Invalid date, expected YYYY-MM-DD",
            "date": raw
        })),
    }
}

/// Attendance history for one student
#[utoipa::path(
    get,
    path = "/attendance/student/{student_code}",
    params(
        ("student_code", Path, description = "Student registration code")
    ),
    responses(
        (status = 200, description = "Full attendance history", body = [AttendanceRecord]),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn student_attendance(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let student_code = path.into_inner();

    match store.records_for_student(&student_code) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(_) => HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })),
    }
}
