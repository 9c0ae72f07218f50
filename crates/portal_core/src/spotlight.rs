//! crates/portal_core/src/spotlight.rs
//!
//! The quick-search overlay. A linear substring scan over the catalog; results
//! keep category order (courses, assignments, exam results, then navigation).

use crate::catalog::Catalog;
use crate::domain::View;

/// What kind of record a result points at. Front-ends pick an icon from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultIcon {
    Course,
    Assignment,
    ExamResult,
    Attendance,
    Fees,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub icon: ResultIcon,
    pub label: String,
    pub description: String,
    pub target: View,
}

/// A one-click destination shown while the query is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub label: &'static str,
    pub target: View,
}

pub const SHORTCUTS: [Shortcut; 5] = [
    Shortcut { label: "Dashboard", target: View::Dashboard },
    Shortcut { label: "Timetable", target: View::Timetable },
    Shortcut { label: "Exams", target: View::Exams },
    Shortcut { label: "Assignments", target: View::Assignments },
    Shortcut { label: "AI Helper", target: View::AiHelp },
];

/// Keyword entries: each matches when one of its keywords contains the query.
const NAVIGATION: [(&[&str], ResultIcon, &str, &str, View); 3] = [
    (&["attendance"], ResultIcon::Attendance, "Attendance", "View detailed attendance", View::Attendance),
    (&["fees", "payment"], ResultIcon::Fees, "Fee Portal", "Pay semester fees", View::Fees),
    (&["profile"], ResultIcon::Profile, "My Profile", "View and edit profile", View::Profile),
];

pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();
    let mut results = Vec::new();

    for course in &catalog.courses {
        if course.name.to_lowercase().contains(&query) || course.code.to_lowercase().contains(&query) {
            results.push(SearchResult {
                icon: ResultIcon::Course,
                label: course.name.clone(),
                description: format!("{} • {}", course.code, course.professor),
                target: View::Courses,
            });
        }
    }

    for assignment in &catalog.assignments {
        if assignment.title.to_lowercase().contains(&query) {
            results.push(SearchResult {
                icon: ResultIcon::Assignment,
                label: assignment.title.clone(),
                description: format!("Assignment • Due: {}", assignment.due_date),
                target: View::Assignments,
            });
        }
    }

    for exam in &catalog.exam_results {
        let Some(course) = catalog.course(&exam.course_id) else {
            continue;
        };
        if course.name.to_lowercase().contains(&query) {
            results.push(SearchResult {
                icon: ResultIcon::ExamResult,
                label: format!("{} Result", course.name),
                description: format!("Grade: {}", exam.grade),
                target: View::Exams,
            });
        }
    }

    for (keywords, icon, label, description, target) in NAVIGATION {
        if keywords.iter().any(|k| k.contains(query.as_str())) {
            results.push(SearchResult {
                icon,
                label: label.to_string(),
                description: description.to_string(),
                target,
            });
        }
    }

    results
}
