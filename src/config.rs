use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub environment: String,
    pub seed_demo_data: bool,
    pub cors_allowed_origin: Option<String>,

    // Rate limiting
    pub rate_students_per_min: u32,
    pub rate_attendance_per_min: u32,
    pub rate_reports_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap(),
            // None => allow any origin (the demo deployment serves browsers
            // from anywhere); set it for production
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),

            rate_students_per_min: env::var("RATE_STUDENTS_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_attendance_per_min: env::var("RATE_ATTENDANCE_PER_MIN")
                .unwrap_or_else(|_| "240".to_string()) // whole class checks in at once
                .parse()
                .unwrap(),
            rate_reports_per_min: env::var("RATE_REPORTS_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
        }
    }
}
