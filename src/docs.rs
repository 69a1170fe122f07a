use crate::model::attendance::{
    AttendanceRecord, AttendanceRequest, AttendanceStats, AttendanceStatus,
};
use crate::model::student::{Student, StudentUpdate};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Roll-Call API",
        version = "1.0.0",
        description = r#"
## Student Roll-Call System

This API manages a classroom roster and daily attendance (roll call).

### 🔹 Key Features
- **Student Management**
  - Register, update, list, and remove students
- **Attendance Marking**
  - One mark per student per day (present / absent / late), re-marks update in place
- **Reports**
  - Daily statistics, missing-student lists, and a general summary

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry a JSON `message` field

### 🚀 Usage
Use this API to build:
- Classroom roll-call dashboards
- Attendance kiosks
- Daily attendance reports

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::info::index,
        crate::api::info::health,

        crate::api::student::list_students,
        crate::api::student::get_student,
        crate::api::student::create_student,
        crate::api::student::update_student,
        crate::api::student::delete_student,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::today_attendance,
        crate::api::attendance::attendance_by_date,
        crate::api::attendance::student_attendance,

        crate::api::report::today_stats,
        crate::api::report::missing_today,
        crate::api::report::summary
    ),
    components(
        schemas(
            Student,
            StudentUpdate,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceRequest,
            AttendanceStats
        )
    ),
    tags(
        (name = "General", description = "Service information APIs"),
        (name = "Students", description = "Student roster management APIs"),
        (name = "Attendance", description = "Daily attendance marking APIs"),
        (name = "Reports", description = "Attendance reporting APIs"),
    )
)]
pub struct ApiDoc;
