//! crates/portal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the student portal.
//! These structs are independent of any rendering or transport format.

use chrono::{DateTime, Utc, Weekday};
use uuid::Uuid;

/// The nine panels the portal can show once the student is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Attendance,
    Timetable,
    Courses,
    Exams,
    Fees,
    Assignments,
    Profile,
    AiHelp,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Dashboard,
        View::Attendance,
        View::Timetable,
        View::Courses,
        View::Exams,
        View::Fees,
        View::Assignments,
        View::Profile,
        View::AiHelp,
    ];

    /// Human-readable title used in menus and headers.
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Attendance => "Attendance",
            View::Timetable => "Timetable",
            View::Courses => "Courses",
            View::Exams => "Exams",
            View::Fees => "Fees",
            View::Assignments => "Assignments",
            View::Profile => "Profile",
            View::AiHelp => "AI Helper",
        }
    }

    /// Resolves a view from a loose, case-insensitive name ("ai", "ai-help", "fees", ...).
    pub fn from_name(name: &str) -> Option<View> {
        let normalized: String = name
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "dashboard" | "home" => Some(View::Dashboard),
            "attendance" => Some(View::Attendance),
            "timetable" | "schedule" => Some(View::Timetable),
            "courses" | "course" => Some(View::Courses),
            "exams" | "exam" | "results" => Some(View::Exams),
            "fees" | "fee" | "payment" => Some(View::Fees),
            "assignments" | "assignment" => Some(View::Assignments),
            "profile" => Some(View::Profile),
            "ai" | "aihelp" | "aihelper" | "chat" => Some(View::AiHelp),
            _ => None,
        }
    }
}

/// The signed-in student. One per session; editable through the profile view.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub program: String,
    pub semester: u8,
    pub email: String,
    pub phone: String,
    pub cgpa: f32,
    /// Either a remote URL or an embedded `data:` URI.
    pub avatar: String,
    pub dob: String,
}

impl Student {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub professor: String,
    pub professor_email: String,
    pub professor_cabin: Option<String>,
    pub professor_office_hours: Option<String>,
    pub credits: u8,
    /// Recorded attendance percentage. Authoritative for policy checks.
    pub attendance: u8,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub syllabus: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    Lecture,
    Lab,
    Tutorial,
}

impl ClassType {
    pub fn label(self) -> &'static str {
        match self {
            ClassType::Lecture => "Lecture",
            ClassType::Lab => "Lab",
            ClassType::Tutorial => "Tutorial",
        }
    }
}

/// One weekly timetable slot. `course_id` is a weak reference into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSession {
    pub id: String,
    pub course_id: String,
    pub day: Weekday,
    pub time: String,
    pub room: String,
    pub kind: ClassType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Graded,
}

impl AssignmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Submitted => "Submitted",
            AssignmentStatus::Graded => "Graded",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub due_date: String,
    pub status: AssignmentStatus,
    pub score: Option<u32>,
    pub max_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeStatus {
    Paid,
    Pending,
    Overdue,
}

impl FeeStatus {
    pub fn label(self) -> &'static str {
        match self {
            FeeStatus::Paid => "Paid",
            FeeStatus::Pending => "Pending",
            FeeStatus::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeRecord {
    pub id: String,
    pub semester: String,
    /// Amount in INR.
    pub amount: u32,
    pub due_date: String,
    pub status: FeeStatus,
    pub payment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    pub course_id: String,
    pub mid_term: u32,
    pub end_term: u32,
    /// Internal assessment marks, when the grading office has supplied them.
    pub internal: Option<u32>,
    pub grade: String,
}

impl ExamResult {
    pub fn total(&self) -> u32 {
        self.mid_term + self.end_term + self.internal.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub kind: NotificationKind,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// A single entry in the AI helper conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Full English weekday name, as the timetable displays it.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
