//! Courses, their units, and departments.

use serde::{Deserialize, Serialize};

/// Fallback accent colour for courses created without one.
pub const DEFAULT_COURSE_COLOR: &str = "#3b82f6";

/// A course as listed by `/admin/courses` and `/student/courses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Course {
    #[serde(default, alias = "_id")]
    pub id: String,

    pub code: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_years: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,

    /// Hex accent colour, e.g. `#3b82f6`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    #[serde(default)]
    pub units: Vec<Unit>,

    /// Number of enrolled students (maintained by the backend on enrollment)
    #[serde(default)]
    pub student_count: u32,
}

impl Course {
    pub fn color_or_default(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_COURSE_COLOR)
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    /// Case-insensitive match on code or name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.code.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
    }
}

/// A unit nested inside a [`Course`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    #[serde(default, alias = "_id")]
    pub id: String,

    pub code: String,

    pub name: String,

    /// Email of the assigned lecturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<u32>,

    /// Room name set by room assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
}

impl Unit {
    pub fn has_lecturer(&self) -> bool {
        self.lecturer.as_deref().is_some_and(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    #[serde(default, alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
}

/// `POST /admin/department`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
}

/// `POST /admin/course`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub department_id: String,
    pub college_id: String,
    pub duration_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `PUT /admin/course/{id}`; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `POST /admin/course/{id}/unit`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUnit {
    pub code: String,
    pub name: String,
    pub year: u32,
    pub semester: u32,
    pub credits: u32,
    pub total_hours: u32,
}

impl Default for NewUnit {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            year: 1,
            semester: 1,
            credits: 3,
            total_hours: 45,
        }
    }
}

/// `PUT /admin/course/{id}/unit/{unit}/assign`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignLecturer {
    pub lecturer_email: String,
}

/// `PUT /admin/course/{id}/room`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetCourseRoom {
    pub room_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_with_nested_units() {
        let json = r##"{
            "id": "c1",
            "code": "BSC-CS",
            "name": "Computer Science",
            "department_id": "d1",
            "college_id": "col1",
            "duration_years": 4,
            "color": "#ff0000",
            "units": [
                {"_id": "u1", "code": "CS101", "name": "Intro", "year": 1, "semester": 1,
                 "lecturer": "lee@uni.ac.ke", "lecturer_id": "l1", "room": "LH1"},
                {"id": "u2", "code": "CS102", "name": "Data Structures"}
            ],
            "student_count": 12
        }"##;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.units.len(), 2);
        assert_eq!(course.unit("u1").map(|u| u.code.as_str()), Some("CS101"));
        assert!(course.unit("u1").unwrap().has_lecturer());
        assert!(!course.unit("u2").unwrap().has_lecturer());
        assert_eq!(course.student_count, 12);
        assert_eq!(course.color_or_default(), "#ff0000");
    }

    #[test]
    fn test_course_defaults() {
        let course: Course =
            serde_json::from_str(r#"{"code": "X", "name": "Bare Course"}"#).unwrap();
        assert!(course.units.is_empty());
        assert_eq!(course.color_or_default(), DEFAULT_COURSE_COLOR);
        assert!(course.matches("bare"));
        assert!(course.matches(""));
        assert!(!course.matches("physics"));
    }

    #[test]
    fn test_assign_lecturer_wire_name() {
        let body = serde_json::to_value(AssignLecturer {
            lecturer_email: "lee@uni.ac.ke".into(),
        })
        .unwrap();
        assert_eq!(body["lecturerEmail"], "lee@uni.ac.ke");
    }

    #[test]
    fn test_course_update_sends_only_set_fields() {
        let update = CourseUpdate {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(update).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Renamed"}));
    }
}
