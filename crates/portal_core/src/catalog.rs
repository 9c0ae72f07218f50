//! crates/portal_core/src/catalog.rs
//!
//! The immutable academic snapshot every session reads from, plus the lookup
//! table that resolves course references.

use std::collections::HashMap;

use chrono::Weekday;

use crate::domain::{
    Assignment, AssignmentStatus, ClassSession, ClassType, Course, ExamResult, FeeRecord,
    FeeStatus, Notification, NotificationKind, Student,
};

/// Minimum attendance percentage required by university policy.
pub const MINIMUM_ATTENDANCE: u8 = 70;

/// Rounded percentage, 0 when there is nothing to divide by.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((f64::from(part) / f64::from(whole)) * 100.0).round() as u32
}

impl Course {
    /// Attendance computed from the class counters rather than the recorded percentage.
    pub fn derived_attendance(&self) -> u32 {
        percent(self.attended_classes, self.total_classes)
    }

    pub fn is_below_minimum(&self) -> bool {
        self.attendance < MINIMUM_ATTENDANCE
    }

    pub fn missed_classes(&self) -> u32 {
        self.total_classes.saturating_sub(self.attended_classes)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub student: Student,
    pub courses: Vec<Course>,
    pub timetable: Vec<ClassSession>,
    pub assignments: Vec<Assignment>,
    pub fees: Vec<FeeRecord>,
    pub exam_results: Vec<ExamResult>,
    /// Notices every fresh session starts with.
    pub notifications: Vec<Notification>,
    course_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(
        student: Student,
        courses: Vec<Course>,
        timetable: Vec<ClassSession>,
        assignments: Vec<Assignment>,
        fees: Vec<FeeRecord>,
        exam_results: Vec<ExamResult>,
        notifications: Vec<Notification>,
    ) -> Self {
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(index, course)| (course.id.clone(), index))
            .collect();
        Self {
            student,
            courses,
            timetable,
            assignments,
            fees,
            exam_results,
            notifications,
            course_index,
        }
    }

    /// Resolves a course reference. A dangling id is simply absent.
    pub fn course(&self, id: &str) -> Option<&Course> {
        match self.course_index.get(id).and_then(|&i| self.courses.get(i)) {
            Some(course) if course.id == id => Some(course),
            // `courses` changed since the index was built.
            _ => self.courses.iter().find(|course| course.id == id),
        }
    }

    pub fn overall_attendance(&self) -> u32 {
        let total: u32 = self.courses.iter().map(|c| c.total_classes).sum();
        let attended: u32 = self.courses.iter().map(|c| c.attended_classes).sum();
        percent(attended, total)
    }

    pub fn pending_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Pending)
    }

    pub fn has_outstanding_fees(&self) -> bool {
        self.fees
            .iter()
            .any(|f| matches!(f.status, FeeStatus::Pending | FeeStatus::Overdue))
    }

    pub fn next_fee_due(&self) -> Option<&str> {
        self.fees
            .iter()
            .find(|f| f.status == FeeStatus::Pending)
            .map(|f| f.due_date.as_str())
    }

    /// First scheduled class on the given day; `None` on days without classes.
    pub fn next_class(&self, day: Weekday) -> Option<&ClassSession> {
        self.timetable.iter().find(|slot| slot.day == day)
    }

    pub fn timetable_for(&self, day: Weekday) -> impl Iterator<Item = &ClassSession> {
        self.timetable.iter().filter(move |slot| slot.day == day)
    }

    pub fn course_sessions<'a>(
        &'a self,
        course_id: &'a str,
    ) -> impl Iterator<Item = &'a ClassSession> {
        self.timetable
            .iter()
            .filter(move |slot| slot.course_id == course_id)
    }

    /// The built-in mock data for The NorthCap University portal.
    pub fn ncu() -> Self {
        let student = Student {
            id: "25CSU078".to_string(),
            name: "Hanu Vishnoi".to_string(),
            program: "B.Tech Cyber Security".to_string(),
            semester: 2,
            email: "hanu25csu078@ncuindia.edu".to_string(),
            phone: "+91 98765 43210".to_string(),
            cgpa: 8.4,
            avatar: "https://picsum.photos/200/200".to_string(),
            dob: "2007-08-15".to_string(),
        };

        let courses = vec![
            course(
                ("CS101", "CSL101", "Programming in C"),
                ("Dr. Sarah Khan", "sarah.khan@ncuindia.edu"),
                ("Block A, Room 305", "Mon, Wed 14:00 - 15:00"),
                (4, 85, 40, 34),
                &["Introduction to C", "Control Structures", "Arrays & Strings", "Pointers", "File Handling"],
            ),
            course(
                ("CS102", "CSL102", "Web Fundamentals"),
                ("Prof. Rahul Verma", "rahul.verma@ncuindia.edu"),
                ("Block C, Room 210", "Tue, Thu 11:00 - 12:00"),
                (3, 72, 36, 26),
                &["HTML5 Basics", "CSS Styling", "JavaScript Intro", "DOM Manipulation", "Responsive Design"],
            ),
            course(
                ("MAT104", "MAT104", "Algebra & Calculus"),
                ("Dr. Anjali Gupta", "anjali.gupta@ncuindia.edu"),
                ("Block B, Room 104", "Wed, Fri 10:00 - 11:00"),
                (4, 92, 42, 39),
                &["Matrices", "Vector Spaces", "Differential Calculus", "Integral Calculus"],
            ),
            course(
                ("EVS101", "EVS101", "Environmental Science"),
                ("Mr. Vikram Singh", "vikram.singh@ncuindia.edu"),
                ("Block A, Room 202", "Mon, Thu 15:00 - 16:00"),
                (2, 65, 28, 18),
                &["Ecosystems", "Biodiversity", "Environmental Pollution", "Social Issues", "Human Population"],
            ),
        ];

        let timetable = vec![
            slot("1", "CS101", Weekday::Mon, "09:00 AM - 10:00 AM", "LH-101", ClassType::Lecture),
            slot("2", "CS102", Weekday::Mon, "10:00 AM - 11:00 AM", "LH-102", ClassType::Lecture),
            slot("3", "MAT104", Weekday::Tue, "09:00 AM - 11:00 AM", "LH-205", ClassType::Lecture),
            slot("4", "EVS101", Weekday::Wed, "02:00 PM - 03:00 PM", "LH-103", ClassType::Lecture),
            slot("5", "CS101", Weekday::Thu, "11:00 AM - 01:00 PM", "LAB-1", ClassType::Lab),
            slot("6", "CS102", Weekday::Fri, "10:00 AM - 11:00 AM", "LAB-2", ClassType::Lab),
        ];

        let assignments = vec![
            Assignment {
                id: "A1".to_string(),
                course_id: "CS101".to_string(),
                title: "Pointers & Arrays Project".to_string(),
                due_date: "2025-05-15".to_string(),
                status: AssignmentStatus::Pending,
                score: None,
                max_score: 20,
            },
            Assignment {
                id: "A2".to_string(),
                course_id: "CS102".to_string(),
                title: "Personal Portfolio Page".to_string(),
                due_date: "2025-05-10".to_string(),
                status: AssignmentStatus::Submitted,
                score: None,
                max_score: 50,
            },
            Assignment {
                id: "A3".to_string(),
                course_id: "MAT104".to_string(),
                title: "Calculus Problem Set".to_string(),
                due_date: "2025-04-20".to_string(),
                status: AssignmentStatus::Graded,
                score: Some(18),
                max_score: 20,
            },
        ];

        let fees = vec![
            FeeRecord {
                id: "F1".to_string(),
                semester: "Semester 1".to_string(),
                amount: 135_000,
                due_date: "2024-07-10".to_string(),
                status: FeeStatus::Paid,
                payment_date: Some("2024-07-05".to_string()),
            },
            FeeRecord {
                id: "F2".to_string(),
                semester: "Semester 2".to_string(),
                amount: 135_000,
                due_date: "2025-01-10".to_string(),
                status: FeeStatus::Pending,
                payment_date: None,
            },
        ];

        let exam_results = [("CS101", 22), ("CS102", 18), ("MAT104", 24), ("EVS101", 15)]
            .into_iter()
            .map(|(course_id, mid_term)| ExamResult {
                course_id: course_id.to_string(),
                mid_term,
                end_term: 0,
                internal: None,
                grade: "NA".to_string(),
            })
            .collect();

        let notifications = vec![
            notice("1", "Class Cancelled", "EVS101 lecture today at 2 PM is cancelled due to faculty meeting.", "2 hours ago", NotificationKind::Alert, false),
            notice("2", "Assignment Reminder", "Web Fundamentals Portfolio is due in 2 days. Don't forget to submit.", "5 hours ago", NotificationKind::Warning, false),
            notice("3", "Library Book Due", "Please return \"Clean Code\" by tomorrow to avoid fines.", "1 day ago", NotificationKind::Info, true),
            notice("4", "Fee Payment Received", "Payment of ₹1,35,000 for Semester 1 has been successfully processed.", "2 days ago", NotificationKind::Success, true),
        ];

        Self::new(
            student,
            courses,
            timetable,
            assignments,
            fees,
            exam_results,
            notifications,
        )
    }
}

fn course(
    (id, code, name): (&str, &str, &str),
    (professor, professor_email): (&str, &str),
    (cabin, office_hours): (&str, &str),
    (credits, attendance, total_classes, attended_classes): (u8, u8, u32, u32),
    syllabus: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        professor: professor.to_string(),
        professor_email: professor_email.to_string(),
        professor_cabin: Some(cabin.to_string()),
        professor_office_hours: Some(office_hours.to_string()),
        credits,
        attendance,
        total_classes,
        attended_classes,
        syllabus: syllabus.iter().map(|s| s.to_string()).collect(),
    }
}

fn slot(id: &str, course_id: &str, day: Weekday, time: &str, room: &str, kind: ClassType) -> ClassSession {
    ClassSession {
        id: id.to_string(),
        course_id: course_id.to_string(),
        day,
        time: time.to_string(),
        room: room.to_string(),
        kind,
    }
}

fn notice(
    id: &str,
    title: &str,
    message: &str,
    time: &str,
    kind: NotificationKind,
    read: bool,
) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        kind,
        read,
    }
}
