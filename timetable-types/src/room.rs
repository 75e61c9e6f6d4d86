//! Teaching rooms.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    #[serde(default, alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub code: String,

    pub name: String,

    #[serde(default)]
    pub capacity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,

    /// Building or location description
    #[serde(default, alias = "building", skip_serializing_if = "Option::is_none")]
    pub building_location: Option<String>,

    /// House/block identifier, e.g. "Block A"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,

    /// Lecture hall, lab, tutorial room...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,

    /// Facility tags such as `projector` or `wifi`
    #[serde(default)]
    pub facilities: Vec<String>,

    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

fn available_by_default() -> bool {
    true
}

impl Room {
    /// Building, falling back to the house identifier.
    pub fn building(&self) -> Option<&str> {
        self.building_location
            .as_deref()
            .or(self.house.as_deref())
            .filter(|b| !b.is_empty())
    }
}

/// Body of `POST /admin/room` and `PUT /admin/room/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomForm {
    pub code: String,
    pub name: String,
    pub capacity: u32,
    pub department_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            capacity: 30,
            department_id: String::new(),
            building_location: None,
            house: None,
            floor: None,
            room_type: None,
            facilities: Vec::new(),
        }
    }
}

impl From<&Room> for RoomForm {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code.clone(),
            name: room.name.clone(),
            capacity: room.capacity,
            department_id: room.department_id.clone().unwrap_or_default(),
            building_location: room.building_location.clone(),
            house: room.house.clone(),
            floor: room.floor,
            room_type: room.room_type.clone(),
            facilities: room.facilities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_legacy_building_field() {
        let room: Room = serde_json::from_str(
            r#"{"id": "r1", "name": "Lab 2", "building": "Science Block", "capacity": 40,
                "facilities": ["projector", "wifi"]}"#,
        )
        .unwrap();
        assert_eq!(room.building(), Some("Science Block"));
        assert_eq!(room.facilities, vec!["projector", "wifi"]);
        assert!(room.is_available);
    }

    #[test]
    fn test_room_building_falls_back_to_house() {
        let room: Room = serde_json::from_str(
            r#"{"id": "r2", "code": "LH1", "name": "Hall 1", "house": "Block A", "capacity": 200}"#,
        )
        .unwrap();
        assert_eq!(room.building(), Some("Block A"));
    }

    #[test]
    fn test_form_from_room_keeps_fields() {
        let room = Room {
            id: "r3".into(),
            code: "T7".into(),
            name: "Tutorial 7".into(),
            capacity: 25,
            department_id: Some("d1".into()),
            building_location: None,
            house: None,
            floor: Some(2),
            room_type: Some("Tutorial room".into()),
            facilities: vec![],
            is_available: false,
        };
        let form = RoomForm::from(&room);
        assert_eq!(form.capacity, 25);
        assert_eq!(form.department_id, "d1");
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("house").is_none());
        assert_eq!(body["floor"], 2);
    }
}
