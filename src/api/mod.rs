pub mod attendance;
pub mod info;
pub mod report;
pub mod student;
