//! Student roll-call and attendance tracking API.
//!
//! In-memory roster plus daily attendance marks, served over HTTP with
//! Swagger documentation at `/docs`.

pub mod api;
pub mod config;
pub mod docs;
pub mod model;
pub mod routes;
pub mod store;
