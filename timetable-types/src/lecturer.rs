//! Lecturer assignments, bookable slots and availability.

use serde::{Deserialize, Serialize};

use crate::timetable::TimetableEntry;
use crate::user::User;

/// Scheduling state of an [`Assignment`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A lecturer's assignment to one unit of one course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    #[serde(default, alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub course_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    #[serde(default)]
    pub unit_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_house: Option<String>,

    #[serde(default)]
    pub student_count: u32,

    #[serde(default)]
    pub class_status: ClassStatus,
}

impl Assignment {
    pub fn course_label(&self) -> &str {
        self.course_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.course_id)
    }

    pub fn unit_label(&self) -> &str {
        self.unit_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.unit_id)
    }

    /// Room, else room name, else `TBA`.
    pub fn room_label(&self) -> &str {
        self.room
            .as_deref()
            .or(self.room_name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("TBA")
    }

    pub fn is_pending(&self) -> bool {
        self.class_status == ClassStatus::Pending
    }
}

/// Booking state of an [`AvailableSlot`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Free to select
    Green,
    /// Booked by another unit
    Red,
    /// Already chosen for this assignment
    Selected,
    /// Free, but the assignment already holds its maximum
    Disabled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A bookable weekly slot from `/lecturer/available-slots/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AvailableSlot {
    pub day: String,

    pub start_time: String,

    pub end_time: String,

    /// Human label, e.g. `9:00 AM - 11:00 AM`
    #[serde(default)]
    pub display: String,

    /// `2 hours` or `3 hours`
    #[serde(default)]
    pub duration: String,

    #[serde(default)]
    pub status: SlotStatus,
}

impl AvailableSlot {
    /// Identity of a slot within one week: day plus start and end.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.day, self.start_time, self.end_time)
    }

    pub fn is_free(&self) -> bool {
        self.status == SlotStatus::Green
    }
}

/// `POST /lecturer/select-time-slot`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectSlotRequest {
    pub assignment_id: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl SelectSlotRequest {
    pub fn for_slot(assignment_id: impl Into<String>, slot: &AvailableSlot) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            day: slot.day.clone(),
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectSlotResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub slots_selected: u32,
    #[serde(default)]
    pub max_slots: u32,
}

/// `POST /lecturer/availability`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub days: Vec<String>,
}

/// Body and list item of `/lecturer/availability/unit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnitAvailability {
    #[serde(alias = "unit_id")]
    pub unit_id: String,
    pub available: bool,
}

/// `GET /lecturer/dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LecturerDashboard {
    #[serde(default)]
    pub lecturer: Option<User>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub timetable: Vec<TimetableEntry>,
    #[serde(default)]
    pub total_assignments: u32,
    #[serde(default)]
    pub confirmed_classes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_labels() {
        let json = r#"{
            "id": "a1",
            "lecturer_id": "l1",
            "course_id": "c1",
            "unit_id": "u1",
            "room_id": "",
            "student_count": 42,
            "class_status": "pending",
            "course_name": "Computer Science",
            "unit_name": "Operating Systems"
        }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert!(a.is_pending());
        assert_eq!(a.course_label(), "Computer Science");
        assert_eq!(a.unit_label(), "Operating Systems");
        assert_eq!(a.room_label(), "TBA");
        assert_eq!(a.student_count, 42);
    }

    #[test]
    fn test_unknown_class_status() {
        let a: Assignment =
            serde_json::from_str(r#"{"id": "a2", "class_status": "archived"}"#).unwrap();
        assert_eq!(a.class_status, ClassStatus::Unknown);
        assert_eq!(a.course_label(), "");
    }

    #[test]
    fn test_slot_status_variants() {
        let json = r#"[
            {"day": "Monday", "start_time": "07:00", "end_time": "09:00",
             "display": "7:00 AM - 9:00 AM", "duration": "2 hours", "status": "green"},
            {"day": "Monday", "start_time": "09:00", "end_time": "11:00",
             "display": "9:00 AM - 11:00 AM", "duration": "2 hours", "status": "red"},
            {"day": "Tuesday", "start_time": "07:00", "end_time": "10:00",
             "display": "7:00 AM - 10:00 AM", "duration": "3 hours", "status": "disabled"}
        ]"#;
        let slots: Vec<AvailableSlot> = serde_json::from_str(json).unwrap();
        assert!(slots[0].is_free());
        assert_eq!(slots[1].status, SlotStatus::Red);
        assert_eq!(slots[2].status, SlotStatus::Disabled);
        assert_eq!(slots[0].key(), "Monday-07:00-09:00");
    }

    #[test]
    fn test_unit_availability_accepts_both_spellings() {
        let a: UnitAvailability =
            serde_json::from_str(r#"{"unitId": "u1", "available": true}"#).unwrap();
        let b: UnitAvailability =
            serde_json::from_str(r#"{"unit_id": "u2", "available": false}"#).unwrap();
        assert!(a.available);
        assert_eq!(b.unit_id, "u2");
        assert_eq!(serde_json::to_value(&a).unwrap()["unitId"], "u1");
    }

    #[test]
    fn test_select_request_from_slot() {
        let slot = AvailableSlot {
            day: "Friday".into(),
            start_time: "13:00".into(),
            end_time: "16:00".into(),
            ..Default::default()
        };
        let req = SelectSlotRequest::for_slot("a9", &slot);
        assert_eq!(req.assignment_id, "a9");
        assert_eq!(req.end_time, "16:00");
    }
}
