//! services/portal/src/views.rs
//!
//! Plain-text rendering of the nine portal views.

use std::fmt::Write;

use chrono::Weekday;
use portal_core::catalog::{Catalog, MINIMUM_ATTENDANCE};
use portal_core::domain::{
    weekday_name, AssignmentStatus, ChatMessage, FeeStatus, Notification, NotificationKind,
    Sender, Student, View,
};
use portal_core::profile::ProfileDraft;
use portal_core::spotlight::{SearchResult, SHORTCUTS};

const SCHOOL_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Everything a view may read.
pub struct ViewContext<'a> {
    pub catalog: &'a Catalog,
    pub student: &'a Student,
    pub chat: &'a [ChatMessage],
    pub chat_pending: bool,
    pub profile_edit: Option<&'a ProfileDraft>,
    pub today: Weekday,
}

pub fn render(view: View, ctx: &ViewContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title());
    match view {
        View::Dashboard => dashboard(&mut out, ctx),
        View::Attendance => attendance(&mut out, ctx.catalog),
        View::Timetable => timetable(&mut out, ctx.catalog),
        View::Courses => courses(&mut out, ctx.catalog),
        View::Exams => exams(&mut out, ctx.catalog),
        View::Fees => fees(&mut out, ctx.catalog),
        View::Assignments => assignments(&mut out, ctx.catalog),
        View::Profile => profile(&mut out, ctx),
        View::AiHelp => ai_help(&mut out, ctx),
    }
    out
}

fn dashboard(out: &mut String, ctx: &ViewContext<'_>) {
    let catalog = ctx.catalog;
    let overall = catalog.overall_attendance();
    let _ = writeln!(out, "Welcome back, {}", ctx.student.first_name());
    let _ = writeln!(
        out,
        "{} | Semester {} | CGPA {}",
        ctx.student.program, ctx.student.semester, ctx.student.cgpa
    );
    let flag = if overall < u32::from(MINIMUM_ATTENDANCE) { "  (below target)" } else { "" };
    let _ = writeln!(out, "Overall attendance: {overall}%{flag}");
    let _ = writeln!(out, "Pending assignments: {}", catalog.pending_assignments().count());
    match catalog.next_fee_due() {
        Some(due) if catalog.has_outstanding_fees() => {
            let _ = writeln!(out, "Fees: payment due by {due}");
        }
        _ => {
            let _ = writeln!(out, "Fees: no dues");
        }
    }
    match catalog.next_class(ctx.today) {
        Some(slot) => {
            let name = catalog
                .course(&slot.course_id)
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown course");
            let _ = writeln!(out, "Next class: {} at {} in {}", name, slot.time, slot.room);
        }
        None => {
            let _ = writeln!(out, "Next class: no classes scheduled today");
        }
    }
    out.push_str("Course performance:\n");
    for course in &catalog.courses {
        let _ = writeln!(out, "  {:<8} {:>3}%", course.code, course.attendance);
    }
}

fn attendance(out: &mut String, catalog: &Catalog) {
    for course in &catalog.courses {
        let _ = writeln!(out, "{} ({})  {}%", course.name, course.code, course.attendance);
        let _ = writeln!(
            out,
            "  attended {} / missed {} of {} (counted {}%)",
            course.attended_classes,
            course.missed_classes(),
            course.total_classes,
            course.derived_attendance()
        );
        if course.is_below_minimum() {
            let _ = writeln!(out, "  ! Below {MINIMUM_ATTENDANCE}% Target");
        }
    }
}

fn timetable(out: &mut String, catalog: &Catalog) {
    for day in SCHOOL_DAYS {
        let _ = writeln!(out, "{}", weekday_name(day));
        let mut any = false;
        for slot in catalog.timetable_for(day) {
            any = true;
            let course = catalog
                .course(&slot.course_id)
                .map(|c| c.name.as_str())
                .unwrap_or("-");
            let _ = writeln!(
                out,
                "  {:<20} {:<24} {:<8} {}",
                slot.time,
                course,
                slot.room,
                slot.kind.label()
            );
        }
        if !any {
            out.push_str("  -\n");
        }
    }
}

fn courses(out: &mut String, catalog: &Catalog) {
    for course in &catalog.courses {
        let _ = writeln!(out, "{} - {} ({} credits)", course.code, course.name, course.credits);
        let _ = writeln!(out, "  {} <{}>", course.professor, course.professor_email);
        let _ = writeln!(
            out,
            "  Cabin: {} | Office hours: {}",
            course.professor_cabin.as_deref().unwrap_or("N/A"),
            course.professor_office_hours.as_deref().unwrap_or("N/A")
        );
        for slot in catalog.course_sessions(&course.id) {
            let _ = writeln!(
                out,
                "  {} {} in {} ({})",
                weekday_name(slot.day),
                slot.time,
                slot.room,
                slot.kind.label()
            );
        }
        for (i, topic) in course.syllabus.iter().enumerate() {
            let _ = writeln!(out, "  Unit {}: {}", i + 1, topic);
        }
    }
}

fn exams(out: &mut String, catalog: &Catalog) {
    let _ = writeln!(
        out,
        "{:<26} {:>4} {:>4} {:>8} {:>5}  Grade",
        "Course", "Mid", "End", "Internal", "Total"
    );
    for result in &catalog.exam_results {
        // A result whose course is gone has nothing to show.
        let Some(course) = catalog.course(&result.course_id) else {
            continue;
        };
        let internal = result
            .internal
            .map(|marks| marks.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<26} {:>4} {:>4} {:>8} {:>5}  {}",
            course.name,
            result.mid_term,
            result.end_term,
            internal,
            result.total(),
            result.grade
        );
    }
}

fn fees(out: &mut String, catalog: &Catalog) {
    for fee in &catalog.fees {
        let _ = write!(
            out,
            "{}: ₹{} due {} [{}]",
            fee.semester,
            fee.amount,
            fee.due_date,
            fee.status.label()
        );
        match (&fee.payment_date, fee.status) {
            (Some(paid), _) => {
                let _ = writeln!(out, " paid on {paid}");
            }
            (None, FeeStatus::Pending | FeeStatus::Overdue) => out.push_str(" - payment open\n"),
            (None, FeeStatus::Paid) => out.push('\n'),
        }
    }
}

fn assignments(out: &mut String, catalog: &Catalog) {
    for assignment in &catalog.assignments {
        let course = catalog
            .course(&assignment.course_id)
            .map(|c| c.code.as_str())
            .unwrap_or("-");
        let score = match (assignment.status, assignment.score) {
            (AssignmentStatus::Graded, Some(score)) => format!("{}/{}", score, assignment.max_score),
            _ => format!("-/{}", assignment.max_score),
        };
        let _ = writeln!(
            out,
            "{:<28} {:<8} due {}  {:<9} {}",
            assignment.title,
            course,
            assignment.due_date,
            assignment.status.label(),
            score
        );
    }
}

fn profile(out: &mut String, ctx: &ViewContext<'_>) {
    let (student, editing) = match ctx.profile_edit {
        Some(draft) => (draft.student(), true),
        None => (ctx.student, false),
    };
    if editing {
        out.push_str("(editing: use `edit <field> <value>`, `avatar <url|file>`, `save` or `cancel`)\n");
    }
    let _ = writeln!(out, "Name:    {}", student.name);
    let _ = writeln!(out, "Roll No: {}", student.id);
    let _ = writeln!(out, "Program: {} (Semester {})", student.program, student.semester);
    let _ = writeln!(out, "Email:   {}", student.email);
    let _ = writeln!(out, "Phone:   {}", student.phone);
    let _ = writeln!(out, "DOB:     {}", student.dob);
    let _ = writeln!(out, "CGPA:    {}", student.cgpa);
    let _ = writeln!(out, "Avatar:  {}", abbreviate(&student.avatar, 60));
}

fn ai_help(out: &mut String, ctx: &ViewContext<'_>) {
    for message in ctx.chat {
        let who = match message.sender {
            Sender::User => "You",
            Sender::Ai => "NCU Assistant",
        };
        let _ = writeln!(out, "[{}] {}: {}", message.timestamp.format("%H:%M"), who, message.text);
    }
    if ctx.chat_pending {
        out.push_str("NCU Assistant is typing...\n");
    }
}

pub fn render_notifications(items: &[Notification]) -> String {
    let unread = items.iter().filter(|n| !n.read).count();
    let mut out = format!("== Notifications ({unread} unread) ==\n");
    if items.is_empty() {
        out.push_str("No notifications\n");
    }
    for item in items {
        let marker = match item.kind {
            NotificationKind::Alert => "!",
            NotificationKind::Warning => "~",
            NotificationKind::Success => "+",
            NotificationKind::Info => "i",
        };
        let dot = if item.read { " " } else { "*" };
        let _ = writeln!(out, "{dot}[{marker}] {} ({})", item.title, item.time);
        let _ = writeln!(out, "      {}", item.message);
    }
    out
}

/// Spotlight results, or the shortcuts when the query is empty.
pub fn render_spotlight(query: &str, results: &[SearchResult]) -> String {
    let mut out = String::new();
    if query.trim().is_empty() {
        out.push_str("Shortcuts:\n");
        for (i, shortcut) in SHORTCUTS.iter().enumerate() {
            let _ = writeln!(out, "  s{} {}", i + 1, shortcut.label);
        }
        return out;
    }
    if results.is_empty() {
        out.push_str("No results found\n");
    }
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "  {} {} - {}", i + 1, result.label, result.description);
    }
    out
}

fn abbreviate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::spotlight::search;

    fn render_view(view: View, today: Weekday) -> String {
        let catalog = Catalog::ncu();
        let ctx = ViewContext {
            catalog: &catalog,
            student: &catalog.student,
            chat: &[],
            chat_pending: false,
            profile_edit: None,
            today,
        };
        render(view, &ctx)
    }

    #[test]
    fn every_view_has_a_header() {
        for view in View::ALL {
            assert!(render_view(view, Weekday::Mon).starts_with(&format!("== {} ==", view.title())));
        }
    }

    #[test]
    fn dashboard_summarizes_the_catalog() {
        let text = render_view(View::Dashboard, Weekday::Tue);
        assert!(text.contains("Welcome back, Hanu"));
        assert!(text.contains("Overall attendance: 80%"));
        assert!(text.contains("Pending assignments: 1"));
        assert!(text.contains("payment due by 2025-01-10"));
        assert!(text.contains("Next class: Algebra & Calculus at 09:00 AM - 11:00 AM in LH-205"));
        assert!(render_view(View::Dashboard, Weekday::Sat).contains("no classes scheduled today"));
    }

    #[test]
    fn attendance_flags_low_courses() {
        let text = render_view(View::Attendance, Weekday::Mon);
        assert_eq!(text.matches("Below 70% Target").count(), 1);
    }

    #[test]
    fn attendance_shows_counted_percentage() {
        let text = render_view(View::Attendance, Weekday::Mon);
        assert!(text.contains("Environmental Science (EVS101)  65%"));
        assert!(text.contains("(counted 64%)"));
    }

    #[test]
    fn courses_list_weekly_slots() {
        let catalog = Catalog::ncu();
        let text = render_view(View::Courses, Weekday::Mon);
        for slot in &catalog.timetable {
            assert!(text.contains(&format!("{} {} in {}", weekday_name(slot.day), slot.time, slot.room)));
        }
    }

    #[test]
    fn exams_show_fixed_internal_marks() {
        let first = render_view(View::Exams, Weekday::Mon);
        assert_eq!(first, render_view(View::Exams, Weekday::Mon));
        assert!(first.contains("Programming in C"));
    }

    #[test]
    fn spotlight_lists_shortcuts_for_empty_query() {
        assert!(render_spotlight("", &[]).contains("s5 AI Helper"));
        assert!(render_spotlight("zzz", &[]).contains("No results found"));
        let catalog = Catalog::ncu();
        let results = search(&catalog, "fees");
        assert!(render_spotlight("fees", &results).contains("1 Fee Portal - Pay semester fees"));
    }

    #[test]
    fn notifications_mark_unread() {
        let catalog = Catalog::ncu();
        let text = render_notifications(&catalog.notifications);
        assert!(text.starts_with("== Notifications (2 unread) =="));
        assert!(text.contains("*[!] Class Cancelled (2 hours ago)"));
        assert!(render_notifications(&[]).contains("No notifications"));
    }
}
