//! Student enrollments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    #[serde(default, alias = "_id")]
    pub id: String,

    /// Student email
    #[serde(default)]
    pub student: String,

    #[serde(default)]
    pub course_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    #[serde(default)]
    pub unit_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<usize>,

    /// ISO-8601 timestamp without offset, as written by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Enrollment {
    pub fn unit_count(&self) -> usize {
        self.unit_count.unwrap_or(self.unit_ids.len())
    }

    pub fn is_enrolled_in_unit(&self, unit_id: &str) -> bool {
        self.unit_ids.iter().any(|id| id == unit_id)
    }
}

/// `POST /student/enroll/{course_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollRequest {
    pub unit_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub unit_ids: Vec<String>,
    #[serde(default)]
    pub student_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_with_course_details() {
        let json = r#"{
            "id": "en1",
            "student": "jane@students.uni.ac.ke",
            "student_id": "s1",
            "course_id": "c1",
            "unit_ids": ["u1", "u2", "u3"],
            "created_at": "2024-09-02T08:15:00.123456",
            "course_code": "BSC-CS",
            "course_name": "Computer Science",
            "unit_count": 3
        }"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert_eq!(enrollment.unit_count(), 3);
        assert!(enrollment.is_enrolled_in_unit("u2"));
        assert!(!enrollment.is_enrolled_in_unit("u9"));
    }

    #[test]
    fn test_unit_count_falls_back_to_ids() {
        let enrollment = Enrollment {
            unit_ids: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(enrollment.unit_count(), 2);
    }
}
