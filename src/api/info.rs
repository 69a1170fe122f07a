use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde_json::json;

use crate::config::Config;
use crate::store::Store;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name, version, and endpoint map", body = Object)
    ),
    tag = "General"
)]
pub async fn index(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Student Roll-Call API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "registered_students": store.student_count(),
        "attendance_records": store.record_count(),
        "timestamp": Utc::now(),
        "endpoints": {
            "students": "/students",
            "attendance": "/attendance",
            "reports": "/reports",
            "documentation": "/docs",
            "health": "/health"
        }
    }))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "healthy",
            "timestamp": "2026-01-01T00:00:00Z",
            "environment": "development",
            "version": "1.0.0"
        }))
    ),
    tag = "General"
)]
pub async fn health(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "environment": config.environment,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
