//! Admin portal pages.

mod courses;
mod dashboard;
mod departments;
mod rooms;
mod settings;
mod timetable;
mod users;

pub use courses::{AdminCourseDetail, AdminCourses};
pub use dashboard::AdminDashboard;
pub use departments::AdminDepartments;
pub use rooms::AdminRooms;
pub use settings::AdminSettings;
pub use timetable::AdminTimetable;
pub use users::AdminUsers;

use chrono::Datelike;
use timetable_types::{Department, Room, Role, User};

/// Calendar year the current academic year starts in.
fn current_academic_year() -> u32 {
    let today = chrono::Local::now().date_naive();
    // Academic years start in September
    let year = if today.month() >= 9 { today.year() } else { today.year() - 1 };
    u32::try_from(year).unwrap_or(2024)
}

fn department_options(departments: &[Department]) -> Vec<(String, String)> {
    departments
        .iter()
        .map(|d| (d.id.clone(), d.name.clone()))
        .collect()
}

fn room_options(rooms: &[Room]) -> Vec<(String, String)> {
    rooms
        .iter()
        .map(|r| (r.id.clone(), format!("{} - {} ({} seats)", r.code, r.name, r.capacity)))
        .collect()
}

fn lecturers(users: &[User]) -> Vec<User> {
    users
        .iter()
        .filter(|u| u.role == Role::Lecturer)
        .cloned()
        .collect()
}

/// `Some(trimmed)` unless blank.
fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" Block A "), Some("Block A".to_string()));
    }

    #[test]
    fn test_room_options() {
        let room: Room = serde_json::from_str(
            r#"{"id": "r1", "code": "LT1", "name": "Lecture Theatre", "capacity": 120}"#,
        )
        .unwrap();
        assert_eq!(
            room_options(&[room]),
            vec![("r1".to_string(), "LT1 - Lecture Theatre (120 seats)".to_string())]
        );
    }
}
