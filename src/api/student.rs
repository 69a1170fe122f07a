use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::info;

use crate::model::student::{Student, StudentUpdate};
use crate::store::{Store, StoreError};

/// List Students
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All registered students", body = [Student])
    ),
    tag = "Students"
)]
pub async fn list_students(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(store.list_students())
}

/// Get Student by code
#[utoipa::path(
    get,
    path = "/students/{student_code}",
    params(
        ("student_code", Path, description = "Student registration code")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Students"
)]
pub async fn get_student(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let student_code = path.into_inner();

    match store.get_student(&student_code) {
        Some(student) => HttpResponse::Ok().json(student),
        None => HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })),
    }
}

/// Register Student
#[utoipa::path(
    post,
    path = "/students",
    request_body = Student,
    responses(
        (status = 200, description = "Student registered", body = Student),
        (status = 400, description = "Student code already registered", body = Object, example = json!({
            "message": "Student code already registered"
        }))
    ),
    tag = "Students"
)]
pub async fn create_student(
    store: web::Data<Store>,
    payload: web::Json<Student>,
) -> impl Responder {
    match store.insert_student(payload.into_inner()) {
        Ok(student) => {
            info!(student_code = %student.student_code, "Student registered");
            HttpResponse::Ok().json(student)
        }
        Err(StoreError::DuplicateStudent(code)) => {
            HttpResponse::BadRequest().json(json!({
                "message": "Student code already registered",
                "student_code": code
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to register student");
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

/// Update Student
#[utoipa::path(
    put,
    path = "/students/{student_code}",
    params(
        ("student_code", Path, description = "Student registration code")
    ),
    request_body = StudentUpdate,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Students"
)]
pub async fn update_student(
    store: web::Data<Store>,
    path: web::Path<String>,
    payload: web::Json<StudentUpdate>,
) -> impl Responder {
    let student_code = path.into_inner();

    match store.update_student(&student_code, payload.into_inner()) {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(_) => HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })),
    }
}

/// Delete Student
///
/// Removing a student also purges their attendance history.
#[utoipa::path(
    delete,
    path = "/students/{student_code}",
    params(
        ("student_code", Path, description = "Student registration code")
    ),
    responses(
        (status = 200, description = "Student removed", body = Object, example = json!({
            "message": "Student Ana García López removed",
            "student": {
                "student_code": "2024001",
                "full_name": "Ana García López",
                "created_at": "2026-01-01T00:00:00Z"
            },
            "attendance_records_removed": 3
        })),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Students"
)]
pub async fn delete_student(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let student_code = path.into_inner();

    match store.remove_student(&student_code) {
        Ok((student, purged)) => {
            info!(student_code = %student.student_code, purged, "Student removed");
            HttpResponse::Ok().json(json!({
                "message": format!("Student {} removed", student.full_name),
                "student": student,
                "attendance_records_removed": purged
            }))
        }
        Err(_) => HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })),
    }
}
