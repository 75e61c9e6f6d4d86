//! Timetable entries, admin time slots and timetable generation.

use serde::{Deserialize, Serialize};

/// One scheduled class.
///
/// The backend writes these rows from several places (slot selection, the
/// generator, manual entry), so nearly every field is optional and both
/// snake_case and camelCase spellings are accepted for the ones the grid
/// relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimetableEntry {
    #[serde(default, alias = "_id")]
    pub id: String,

    #[serde(default, alias = "courseId", skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    #[serde(default, alias = "unitId", skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    #[serde(default, alias = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// Room name as copied onto the entry at selection time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_house: Option<String>,

    /// Weekday name, e.g. `Monday`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    /// `HH:MM`
    #[serde(default, alias = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, alias = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Explicit grid slot, e.g. `monday-0`
    #[serde(default, alias = "timeSlotId", skip_serializing_if = "Option::is_none")]
    pub time_slot_id: Option<String>,

    #[serde(default, alias = "hasClash")]
    pub has_clash: bool,

    #[serde(default, alias = "clashReason", skip_serializing_if = "Option::is_none")]
    pub clash_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TimetableEntry {
    /// Course code, else name, else id.
    pub fn course_label(&self) -> Option<&str> {
        non_empty(&self.course_code)
            .or_else(|| non_empty(&self.course_name))
            .or_else(|| non_empty(&self.course_id))
    }

    /// Course name, else code. Used where a readable title is wanted.
    pub fn course_title(&self) -> Option<&str> {
        non_empty(&self.course_name).or_else(|| non_empty(&self.course_code))
    }

    pub fn unit_label(&self) -> Option<&str> {
        non_empty(&self.unit_code).or_else(|| non_empty(&self.unit_name))
    }

    /// Room name, else the plain room field.
    pub fn room_label(&self) -> Option<&str> {
        non_empty(&self.room_name).or_else(|| non_empty(&self.room))
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.as_deref().unwrap_or(""),
            self.end_time.as_deref().unwrap_or("")
        )
    }
}

/// `POST /admin/timeslot`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTimeslot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: u32,
    pub semester: u32,
    pub academic_year: u32,
}

/// `POST /timetable/generate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub semester: u32,
    pub academic_year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub generated_entries: u32,
    #[serde(default)]
    pub clashes_detected: u32,
    #[serde(default)]
    pub unassigned: u32,
}

/// `GET /timetable/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimetableStats {
    #[serde(default)]
    pub semester: u32,
    #[serde(default)]
    pub academic_year: u32,
    #[serde(default)]
    pub total_timetable_entries: u32,
    #[serde(default)]
    pub active_classes: u32,
    #[serde(default)]
    pub cancelled_classes: u32,
    #[serde(default)]
    pub total_assignments: u32,
    #[serde(default)]
    pub confirmed_assignments: u32,
    #[serde(default)]
    pub pending_assignments: u32,
    #[serde(default)]
    pub clash_count: u32,
}

/// Counts returned by `POST /admin/assign-rooms-to-units`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomAssignmentSummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub assigned: u32,
    #[serde(default)]
    pub failed: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomAssignmentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub summary: RoomAssignmentSummary,
}
