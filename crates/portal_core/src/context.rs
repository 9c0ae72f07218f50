//! crates/portal_core/src/context.rs
//!
//! Serializes the student's academic record into the plain-text snapshot that
//! grounds the AI helper's answers.

use std::fmt::Write;

use crate::catalog::{Catalog, MINIMUM_ATTENDANCE};
use crate::domain::Student;

/// Builds the context snapshot. `student` is the live (possibly edited) record.
pub fn context_snapshot(student: &Student, catalog: &Catalog) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Student Name: {}", student.name);
    let _ = writeln!(out, "ID: {}", student.id);
    let _ = writeln!(out, "Program: {}", student.program);
    let _ = writeln!(out, "CGPA: {}", student.cgpa);
    out.push('\n');

    out.push_str("Important Policy:\n");
    let _ = writeln!(out, "- Minimum Attendance Requirement is {MINIMUM_ATTENDANCE}%.");
    out.push('\n');

    let _ = writeln!(out, "Courses & Attendance (Goal {MINIMUM_ATTENDANCE}%):");
    for course in &catalog.courses {
        let _ = writeln!(
            out,
            "- {} ({}): {}% attendance. Professor: {} (Cabin: {}, Office Hours: {})",
            course.name,
            course.code,
            course.attendance,
            course.professor,
            course.professor_cabin.as_deref().unwrap_or("N/A"),
            course.professor_office_hours.as_deref().unwrap_or("N/A"),
        );
    }
    out.push('\n');

    out.push_str("Pending Assignments:\n");
    let mut any_pending = false;
    for assignment in catalog.pending_assignments() {
        any_pending = true;
        let _ = writeln!(out, "- {} (Due: {})", assignment.title, assignment.due_date);
    }
    if !any_pending {
        out.push_str("None\n");
    }
    out.push('\n');

    out.push_str("Fee Status:\n");
    for fee in &catalog.fees {
        let _ = writeln!(
            out,
            "- {}: {} INR, Status: {}",
            fee.semester,
            fee.amount,
            fee.status.label()
        );
    }

    out
}
