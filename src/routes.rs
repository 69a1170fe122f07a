use crate::{
    api::{attendance, info, report, student},
    config::Config,
    docs::ApiDoc,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, http::header, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// The swagger service only matches under the /docs/ wildcard, and
// NormalizePath::trim folds /docs/ into /docs, so the bare path goes
// straight to the index file.
async fn docs_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/docs/index.html"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            // burst_size(0) makes finish() return None
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // General
    cfg.service(web::resource("/").route(web::get().to(info::index)));
    cfg.service(web::resource("/health").route(web::get().to(info::health)));

    // Interactive documentation
    cfg.service(web::resource("/docs").route(web::get().to(docs_redirect)));
    cfg.service(
        // ← important: wildcard {_:.*} to match JS/CSS files
        SwaggerUi::new("/docs/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
    );

    cfg.service(
        web::scope("/students")
            .wrap(build_limiter(config.rate_students_per_min))
            // /students
            .service(
                web::resource("")
                    .route(web::get().to(student::list_students))
                    .route(web::post().to(student::create_student)),
            )
            // /students/{student_code}
            .service(
                web::resource("/{student_code}")
                    .route(web::get().to(student::get_student))
                    .route(web::put().to(student::update_student))
                    .route(web::delete().to(student::delete_student)),
            ),
    );

    cfg.service(
        web::scope("/attendance")
            .wrap(build_limiter(config.rate_attendance_per_min))
            // /attendance
            .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
            // /attendance/today
            .service(web::resource("/today").route(web::get().to(attendance::today_attendance)))
            // /attendance/date/{date}
            .service(
                web::resource("/date/{date}").route(web::get().to(attendance::attendance_by_date)),
            )
            // /attendance/student/{student_code}
            .service(
                web::resource("/student/{student_code}")
                    .route(web::get().to(attendance::student_attendance)),
            ),
    );

    cfg.service(
        web::scope("/reports")
            .wrap(build_limiter(config.rate_reports_per_min))
            .service(web::resource("/stats/today").route(web::get().to(report::today_stats)))
            .service(web::resource("/missing-today").route(web::get().to(report::missing_today)))
            .service(web::resource("/summary").route(web::get().to(report::summary))),
    );
}
