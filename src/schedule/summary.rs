//! Dashboard figures computed from already-fetched lists.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use timetable_types::{Assignment, ClassStatus, Course, Enrollment, Role, Room, TimetableEntry, User};

use super::clash::detect_clashes;

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSummary {
    pub courses: usize,
    pub units: usize,
    pub rooms: usize,
    pub users: usize,
    pub students: usize,
    pub lecturers: usize,
    pub unassigned_units: usize,
}

impl AdminSummary {
    pub fn from_lists(courses: &[Course], rooms: &[Room], users: &[User]) -> Self {
        let count_role = |role: Role| users.iter().filter(|u| u.role == role).count();
        Self {
            courses: courses.len(),
            units: courses.iter().map(|c| c.units.len()).sum(),
            rooms: rooms.len(),
            users: users.len(),
            students: count_role(Role::Student),
            lecturers: count_role(Role::Lecturer),
            unassigned_units: courses
                .iter()
                .flat_map(|c| &c.units)
                .filter(|u| !u.has_lecturer())
                .count(),
        }
    }
}

/// Student dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentSummary {
    pub enrolled_courses: usize,
    pub total_units: usize,
    pub classes_this_week: usize,
    pub clashes: usize,
}

impl StudentSummary {
    pub fn from_lists(enrollments: &[Enrollment], timetable: &[TimetableEntry]) -> Self {
        Self {
            enrolled_courses: unique_courses(enrollments).len(),
            total_units: enrollments.iter().map(Enrollment::unit_count).sum(),
            classes_this_week: timetable.len(),
            clashes: detect_clashes(timetable).len(),
        }
    }
}

/// One enrollment per course, in first-seen order.
pub fn unique_courses(enrollments: &[Enrollment]) -> Vec<&Enrollment> {
    let mut seen = Vec::new();
    enrollments
        .iter()
        .filter(|e| {
            if seen.contains(&e.course_id.as_str()) {
                false
            } else {
                seen.push(e.course_id.as_str());
                true
            }
        })
        .collect()
}

/// Lecturer dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeachingSummary {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub total_students: u32,
}

impl TeachingSummary {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let with_status = |status: ClassStatus| {
            assignments
                .iter()
                .filter(|a| a.class_status == status)
                .count()
        };
        Self {
            total: assignments.len(),
            confirmed: with_status(ClassStatus::Confirmed),
            pending: with_status(ClassStatus::Pending),
            total_students: assignments.iter().map(|a| a.student_count).sum(),
        }
    }
}

/// "Mar 4, 2025" from an enrollment timestamp, or "N/A".
pub fn format_enrolled_on(created_at: Option<&str>) -> String {
    let Some(raw) = created_at.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_types::Unit;

    fn enrollment(id: &str, course: &str, units: &[&str]) -> Enrollment {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "student": "s@students.uni.ac.ke",
            "course_id": course,
            "unit_ids": units,
        }))
        .unwrap()
    }

    #[test]
    fn test_student_summary() {
        let enrollments = vec![
            enrollment("e1", "c1", &["u1", "u2"]),
            enrollment("e2", "c1", &["u3"]),
            enrollment("e3", "c2", &["u4"]),
        ];
        let timetable = vec![
            TimetableEntry {
                day: Some("Monday".into()),
                start_time: Some("08:00".into()),
                ..Default::default()
            },
            TimetableEntry {
                day: Some("Monday".into()),
                start_time: Some("08:00".into()),
                ..Default::default()
            },
        ];
        let summary = StudentSummary::from_lists(&enrollments, &timetable);
        assert_eq!(summary.enrolled_courses, 2);
        assert_eq!(summary.total_units, 4);
        assert_eq!(summary.classes_this_week, 2);
        assert_eq!(summary.clashes, 1);
    }

    #[test]
    fn test_unique_courses_keep_first() {
        let enrollments = vec![
            enrollment("e1", "c1", &[]),
            enrollment("e2", "c2", &[]),
            enrollment("e3", "c1", &[]),
        ];
        let ids: Vec<_> = unique_courses(&enrollments).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_teaching_summary() {
        let assignments: Vec<Assignment> = serde_json::from_value(serde_json::json!([
            {"id": "a1", "course_id": "c1", "unit_id": "u1", "student_count": 30, "class_status": "confirmed"},
            {"id": "a2", "course_id": "c1", "unit_id": "u2", "student_count": 12, "class_status": "pending"},
            {"id": "a3", "course_id": "c2", "unit_id": "u3"}
        ]))
        .unwrap();
        let summary = TeachingSummary::from_assignments(&assignments);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.confirmed, 1);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.total_students, 42);
    }

    #[test]
    fn test_admin_summary() {
        let mut course = Course {
            id: "c1".into(),
            code: "BSC".into(),
            name: "Science".into(),
            ..Default::default()
        };
        course.units = vec![
            Unit {
                id: "u1".into(),
                lecturer: Some("l@uni.ac.ke".into()),
                ..Default::default()
            },
            Unit {
                id: "u2".into(),
                ..Default::default()
            },
        ];
        let users = vec![
            User::from_claims("a@students.uni.ac.ke", Role::Student),
            User::from_claims("b@students.uni.ac.ke", Role::Student),
            User::from_claims("l@uni.ac.ke", Role::Lecturer),
            User::from_claims("admin@uni.ac.ke", Role::Admin),
        ];
        let summary = AdminSummary::from_lists(&[course], &[], &users);
        assert_eq!(summary.courses, 1);
        assert_eq!(summary.units, 2);
        assert_eq!(summary.unassigned_units, 1);
        assert_eq!(summary.users, 4);
        assert_eq!(summary.students, 2);
        assert_eq!(summary.lecturers, 1);
    }

    #[test]
    fn test_format_enrolled_on() {
        assert_eq!(format_enrolled_on(Some("2025-03-04T10:15:00Z")), "Mar 4, 2025");
        assert_eq!(format_enrolled_on(Some("2025-03-04T10:15:00.123456")), "Mar 4, 2025");
        assert_eq!(format_enrolled_on(Some("2025-11-20")), "Nov 20, 2025");
        assert_eq!(format_enrolled_on(Some("yesterday")), "N/A");
        assert_eq!(format_enrolled_on(None), "N/A");
    }
}
