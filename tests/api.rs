//! End-to-end tests driving the real route table over an in-memory store.

use actix_web::{App, test, web::Data};
use rollcall::{config::Config, routes, store::Store};
use serde_json::{Value, json};

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        environment: "test".to_string(),
        seed_demo_data: false,
        cors_allowed_origin: None,
        rate_students_per_min: 1000,
        rate_attendance_per_min: 1000,
        rate_reports_per_min: 1000,
    }
}

// The app type is a deep generic soup, so this stays a macro rather than a
// helper function.
macro_rules! spawn_app {
    () => {{
        let config = test_config();
        let routes_config = config.clone();
        test::init_service(
            App::new()
                .app_data(Data::new(Store::new()))
                .app_data(Data::new(config))
                .configure(move |cfg| routes::configure(cfg, routes_config.clone())),
        )
        .await
    }};
}

// The governor key extractor needs a peer address, which TestRequest does
// not set by default.
fn get(path: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(path)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

fn post_json(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

fn put_json(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(path)
        .set_json(body)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

fn delete(path: &str) -> test::TestRequest {
    test::TestRequest::delete()
        .uri(path)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

#[actix_web::test]
async fn register_list_and_fetch_student() {
    let app = spawn_app!();

    let resp = test::call_service(
        &app,
        post_json(
            "/students",
            json!({"student_code": "s1", "full_name": "Ada Lovelace"}),
        )
        .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["student_code"], "s1");
    assert_eq!(created["full_name"], "Ada Lovelace");
    // created_at is filled server-side when the body omits it
    assert!(created["created_at"].is_string());

    let listed: Value =
        test::call_and_read_body_json(&app, get("/students").to_request()).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let fetched: Value =
        test::call_and_read_body_json(&app, get("/students/s1").to_request()).await;
    assert_eq!(fetched["full_name"], "Ada Lovelace");
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let app = spawn_app!();

    let body = json!({"student_code": "s1", "full_name": "Ada Lovelace"});
    let first = test::call_service(&app, post_json("/students", body.clone()).to_request()).await;
    assert!(first.status().is_success());

    let second = test::call_service(&app, post_json("/students", body).to_request()).await;
    assert_eq!(second.status(), 400);
    let err: Value = test::read_body_json(second).await;
    assert_eq!(err["message"], "Student code already registered");
}

#[actix_web::test]
async fn fetching_unknown_student_is_404() {
    let app = spawn_app!();
    let resp = test::call_service(&app, get("/students/ghost").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn update_changes_only_the_name() {
    let app = spawn_app!();
    test::call_service(
        &app,
        post_json("/students", json!({"student_code": "s1", "full_name": "Ada"})).to_request(),
    )
    .await;

    let updated: Value = test::call_and_read_body_json(
        &app,
        put_json("/students/s1", json!({"full_name": "Ada Lovelace"})).to_request(),
    )
    .await;
    assert_eq!(updated["full_name"], "Ada Lovelace");
    assert_eq!(updated["student_code"], "s1");

    let resp = test::call_service(
        &app,
        put_json("/students/ghost", json!({"full_name": "Nobody"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn marking_twice_on_the_same_day_updates_in_place() {
    let app = spawn_app!();
    test::call_service(
        &app,
        post_json("/students", json!({"student_code": "s1", "full_name": "Ada"})).to_request(),
    )
    .await;

    let first: Value = test::call_and_read_body_json(
        &app,
        post_json("/attendance", json!({"student_code": "s1"})).to_request(),
    )
    .await;
    // status defaults to present
    assert_eq!(first["status"], "present");

    let second: Value = test::call_and_read_body_json(
        &app,
        post_json(
            "/attendance",
            json!({"student_code": "s1", "status": "late", "notes": "missed the bus"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(second["status"], "late");
    assert_eq!(second["notes"], "missed the bus");
    assert_eq!(second["id"], first["id"]);

    let today: Value =
        test::call_and_read_body_json(&app, get("/attendance/today").to_request()).await;
    assert_eq!(today.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn marking_unknown_student_is_404() {
    let app = spawn_app!();
    let resp = test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "ghost"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn attendance_by_date_validates_the_date() {
    let app = spawn_app!();

    let resp = test::call_service(&app, get("/attendance/date/not-a-date").to_request()).await;
    assert_eq!(resp.status(), 400);

    let empty: Value =
        test::call_and_read_body_json(&app, get("/attendance/date/2020-01-01").to_request()).await;
    assert_eq!(empty, json!([]));
}

#[actix_web::test]
async fn student_history_requires_a_known_student() {
    let app = spawn_app!();
    test::call_service(
        &app,
        post_json("/students", json!({"student_code": "s1", "full_name": "Ada"})).to_request(),
    )
    .await;
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s1"})).to_request(),
    )
    .await;

    let history: Value =
        test::call_and_read_body_json(&app, get("/attendance/student/s1").to_request()).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let resp = test::call_service(&app, get("/attendance/student/ghost").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn deleting_a_student_purges_their_history() {
    let app = spawn_app!();
    test::call_service(
        &app,
        post_json("/students", json!({"student_code": "s1", "full_name": "Ada"})).to_request(),
    )
    .await;
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s1"})).to_request(),
    )
    .await;

    let deleted: Value =
        test::call_and_read_body_json(&app, delete("/students/s1").to_request()).await;
    assert_eq!(deleted["attendance_records_removed"], 1);
    assert_eq!(deleted["student"]["student_code"], "s1");

    let today: Value =
        test::call_and_read_body_json(&app, get("/attendance/today").to_request()).await;
    assert_eq!(today, json!([]));

    let resp = test::call_service(&app, delete("/students/s1").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn today_stats_count_unmarked_students_as_absent() {
    let app = spawn_app!();
    for (code, name) in [("s1", "Ada"), ("s2", "Grace"), ("s3", "Edsger")] {
        test::call_service(
            &app,
            post_json("/students", json!({"student_code": code, "full_name": name})).to_request(),
        )
        .await;
    }
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s1", "status": "present"})).to_request(),
    )
    .await;
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s2", "status": "late"})).to_request(),
    )
    .await;

    let stats: Value =
        test::call_and_read_body_json(&app, get("/reports/stats/today").to_request()).await;
    assert_eq!(stats["total_students"], 3);
    assert_eq!(stats["present"], 1);
    assert_eq!(stats["late"], 1);
    assert_eq!(stats["absent"], 1);
    assert_eq!(stats["attendance_rate"], 33.33);
}

#[actix_web::test]
async fn missing_today_lists_unmarked_students() {
    let app = spawn_app!();
    for (code, name) in [("s1", "Ada"), ("s2", "Grace")] {
        test::call_service(
            &app,
            post_json("/students", json!({"student_code": code, "full_name": name})).to_request(),
        )
        .await;
    }
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s1"})).to_request(),
    )
    .await;

    let report: Value =
        test::call_and_read_body_json(&app, get("/reports/missing-today").to_request()).await;
    assert_eq!(report["total_missing"], 1);
    assert_eq!(report["missing_students"][0]["student_code"], "s2");
}

#[actix_web::test]
async fn summary_reports_system_totals_and_today_breakdown() {
    let app = spawn_app!();
    test::call_service(
        &app,
        post_json("/students", json!({"student_code": "s1", "full_name": "Ada"})).to_request(),
    )
    .await;
    test::call_service(
        &app,
        post_json("/attendance", json!({"student_code": "s1", "status": "absent"})).to_request(),
    )
    .await;

    let summary: Value =
        test::call_and_read_body_json(&app, get("/reports/summary").to_request()).await;
    assert_eq!(summary["system"]["total_students"], 1);
    assert_eq!(summary["system"]["total_attendance_records"], 1);
    assert_eq!(summary["today"]["records"], 1);
    assert_eq!(summary["today"]["absent"], 1);
    assert_eq!(summary["today"]["present"], 0);
}

#[actix_web::test]
async fn docs_are_reachable_from_the_bare_path() {
    let app = spawn_app!();

    let resp = test::call_service(&app, get("/docs").to_request()).await;
    assert_eq!(resp.status(), 302);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(location, "/docs/index.html");

    let index = test::call_service(&app, get("/docs/index.html").to_request()).await;
    assert!(index.status().is_success());

    let openapi: Value =
        test::call_and_read_body_json(&app, get("/api-doc/openapi.json").to_request()).await;
    assert_eq!(openapi["info"]["title"], "Student Roll-Call API");
    assert!(openapi["paths"]["/attendance"].is_object());
}

#[actix_web::test]
async fn zero_rate_limit_config_still_serves() {
    let mut config = test_config();
    config.rate_students_per_min = 0;
    config.rate_attendance_per_min = 0;
    config.rate_reports_per_min = 0;
    let routes_config = config.clone();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(Store::new()))
            .app_data(Data::new(config))
            .configure(move |cfg| routes::configure(cfg, routes_config.clone())),
    )
    .await;

    let resp = test::call_service(&app, get("/students").to_request()).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn banner_and_health_respond() {
    let app = spawn_app!();

    let banner: Value = test::call_and_read_body_json(&app, get("/").to_request()).await;
    assert_eq!(banner["message"], "Student Roll-Call API");
    assert_eq!(banner["registered_students"], 0);
    assert_eq!(banner["endpoints"]["documentation"], "/docs");

    let health: Value = test::call_and_read_body_json(&app, get("/health").to_request()).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["environment"], "test");
}
