use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::model::attendance::{
    AttendanceRecord, AttendanceRequest, AttendanceStats, AttendanceStatus,
};
use crate::model::student::{Student, StudentUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("student code already registered: {0}")]
    DuplicateStudent(String),
    #[error("student not found: {0}")]
    UnknownStudent(String),
}

/// Demo roster the service boots with when SEED_DEMO_DATA is on.
const DEMO_ROSTER: [(&str, &str); 10] = [
    ("2024001", "Ana García López"),
    ("2024002", "Carlos Rodríguez Martín"),
    ("2024003", "María Fernández Silva"),
    ("2024004", "José Luis Hernández"),
    ("2024005", "Laura Martínez Ruiz"),
    ("2024006", "Pedro Sánchez Morales"),
    ("2024007", "Carmen Jiménez Torres"),
    ("2024008", "Miguel Ángel Ruiz"),
    ("2024009", "Isabel Moreno Castro"),
    ("2024010", "Francisco Javier López"),
];

/// In-memory roster and attendance log, shared through `web::Data`.
///
/// The roster is a `BTreeMap` keyed by student code so listings come back in
/// a deterministic order. Check-then-act operations (duplicate registration,
/// the daily upsert, the cascade delete) hold the roster lock for their full
/// duration — the upsert keeps its roster read guard across the attendance
/// write, so a mark can never race a student removal. Lock order is always
/// students before attendance.
#[derive(Default)]
pub struct Store {
    students: RwLock<BTreeMap<String, Student>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the demo roster, skipping codes that are already registered.
    pub fn seed_demo_roster(&self, now: DateTime<Utc>) {
        let mut students = self.students_write();
        for (code, name) in DEMO_ROSTER {
            students.entry(code.to_string()).or_insert_with(|| Student {
                student_code: code.to_string(),
                full_name: name.to_string(),
                created_at: now,
            });
        }
        tracing::info!(students = students.len(), "Demo roster loaded");
    }

    // A poisoned lock only means another thread panicked mid-request; the
    // data itself is still coherent, so recover the guard instead of
    // propagating the panic to every later request.
    fn students_read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Student>> {
        self.students.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn students_write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Student>> {
        self.students
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn attendance_read(&self) -> RwLockReadGuard<'_, Vec<AttendanceRecord>> {
        self.attendance
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn attendance_write(&self) -> RwLockWriteGuard<'_, Vec<AttendanceRecord>> {
        self.attendance
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------- students --------------------

    pub fn list_students(&self) -> Vec<Student> {
        self.students_read().values().cloned().collect()
    }

    pub fn get_student(&self, code: &str) -> Option<Student> {
        self.students_read().get(code).cloned()
    }

    pub fn insert_student(&self, student: Student) -> Result<Student, StoreError> {
        let mut students = self.students_write();
        if students.contains_key(&student.student_code) {
            return Err(StoreError::DuplicateStudent(student.student_code));
        }
        students.insert(student.student_code.clone(), student.clone());
        Ok(student)
    }

    pub fn update_student(&self, code: &str, update: StudentUpdate) -> Result<Student, StoreError> {
        let mut students = self.students_write();
        let student = students
            .get_mut(code)
            .ok_or_else(|| StoreError::UnknownStudent(code.to_string()))?;
        if let Some(full_name) = update.full_name {
            student.full_name = full_name;
        }
        Ok(student.clone())
    }

    /// Remove a student and purge their attendance history. Returns the
    /// removed student and how many records went with them.
    pub fn remove_student(&self, code: &str) -> Result<(Student, usize), StoreError> {
        let mut students = self.students_write();
        let student = students
            .remove(code)
            .ok_or_else(|| StoreError::UnknownStudent(code.to_string()))?;

        let mut attendance = self.attendance_write();
        let before = attendance.len();
        attendance.retain(|record| record.student_code != code);
        Ok((student, before - attendance.len()))
    }

    pub fn student_count(&self) -> usize {
        self.students_read().len()
    }

    // -------------------- attendance --------------------

    /// Mark attendance for `today`. At most one record exists per student per
    /// day: a second mark updates the status, timestamp, and notes in place.
    pub fn mark_attendance(
        &self,
        request: AttendanceRequest,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, StoreError> {
        // The roster guard stays alive across the attendance write: releasing
        // it early would let a concurrent remove_student purge the roster
        // between the lookup and the push, leaving an orphan record.
        let students = self.students_read();
        let student = students
            .get(&request.student_code)
            .ok_or_else(|| StoreError::UnknownStudent(request.student_code.clone()))?;
        let full_name = student.full_name.clone();

        let mut attendance = self.attendance_write();
        if let Some(existing) = attendance
            .iter_mut()
            .find(|record| record.student_code == request.student_code && record.date == today)
        {
            existing.status = request.status;
            existing.recorded_at = now;
            existing.notes = request.notes;
            return Ok(existing.clone());
        }

        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            student_code: request.student_code,
            full_name,
            status: request.status,
            date: today,
            recorded_at: now,
            notes: request.notes,
        };
        attendance.push(record.clone());
        Ok(record)
    }

    pub fn records_on(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.attendance_read()
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    pub fn records_for_student(&self, code: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        if !self.students_read().contains_key(code) {
            return Err(StoreError::UnknownStudent(code.to_string()));
        }
        Ok(self
            .attendance_read()
            .iter()
            .filter(|record| record.student_code == code)
            .cloned()
            .collect())
    }

    pub fn record_count(&self) -> usize {
        self.attendance_read().len()
    }

    // -------------------- reporting --------------------

    /// Aggregate counts for one day. Students with no record that day count
    /// as absent on top of any explicit absent marks.
    pub fn stats_on(&self, date: NaiveDate) -> AttendanceStats {
        let total_students = self.student_count();
        let records = self.records_on(date);

        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let late = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Late)
            .count();
        let marked_absent = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();
        let absent = total_students.saturating_sub(records.len()) + marked_absent;

        let attendance_rate = if total_students > 0 {
            let pct = present as f64 / total_students as f64 * 100.0;
            (pct * 100.0).round() / 100.0
        } else {
            0.0
        };

        AttendanceStats {
            total_students,
            present,
            absent,
            late,
            attendance_rate,
        }
    }

    /// Students with no attendance record on the given day.
    pub fn missing_on(&self, date: NaiveDate) -> Vec<Student> {
        // lock order: students before attendance, same as remove_student
        let students = self.students_read();
        let attendance = self.attendance_read();
        let marked: HashSet<&str> = attendance
            .iter()
            .filter(|record| record.date == date)
            .map(|record| record.student_code.as_str())
            .collect();

        students
            .values()
            .filter(|student| !marked.contains(student.student_code.as_str()))
            .cloned()
            .collect()
    }
}
