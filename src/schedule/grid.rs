//! Timetable grid placement.
//!
//! The grid is fixed: five weekdays by nine one-hour slots starting at
//! 08:00. A cell is addressed by its slot key, `"<lowercase day>-<index>"`
//! (`monday-0` is Monday 08:00 - 09:00).

use std::collections::HashMap;

use timetable_types::{TimetableEntry, UnitAvailability};

pub const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const TIME_SLOTS: [&str; 9] = [
    "08:00 - 09:00",
    "09:00 - 10:00",
    "10:00 - 11:00",
    "11:00 - 12:00",
    "12:00 - 13:00",
    "13:00 - 14:00",
    "14:00 - 15:00",
    "15:00 - 16:00",
    "16:00 - 17:00",
];

/// Hour of slot index 0.
pub const FIRST_HOUR: u32 = 8;

pub fn slot_key(day: &str, index: usize) -> String {
    format!("{}-{}", day.trim().to_lowercase(), index)
}

/// Slot index for an `HH:MM` start time, if it falls on the grid.
pub fn slot_index(start_time: &str) -> Option<usize> {
    let hour: u32 = start_time.trim().split(':').next()?.trim().parse().ok()?;
    let index = hour.checked_sub(FIRST_HOUR)? as usize;
    (index < TIME_SLOTS.len()).then_some(index)
}

/// The cell an entry belongs in: its explicit slot id, else derived from
/// day and start hour.
pub fn entry_slot_key(entry: &TimetableEntry) -> Option<String> {
    if let Some(id) = entry
        .time_slot_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        return Some(id.to_lowercase());
    }
    let day = entry.day.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
    let index = slot_index(entry.start_time.as_deref()?)?;
    Some(slot_key(day, index))
}

/// What a grid cell renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub entry: &'a TimetableEntry,
    /// Lecturer availability for the entry's unit, when known
    pub lecturer_available: Option<bool>,
}

impl GridCell<'_> {
    pub fn has_clash(&self) -> bool {
        self.entry.has_clash
    }

    pub fn clash_reason(&self) -> Option<&str> {
        if self.entry.has_clash {
            self.entry.clash_reason.as_deref()
        } else {
            None
        }
    }
}

/// Entries placed by slot key. The first entry for a key wins.
#[derive(Debug, Default)]
pub struct Grid<'a> {
    cells: HashMap<String, &'a TimetableEntry>,
    availability: HashMap<&'a str, bool>,
}

impl<'a> Grid<'a> {
    pub fn build(entries: &'a [TimetableEntry], availability: &'a [UnitAvailability]) -> Self {
        let mut cells = HashMap::new();
        for entry in entries {
            if let Some(key) = entry_slot_key(entry) {
                cells.entry(key).or_insert(entry);
            }
        }
        let availability = availability
            .iter()
            .map(|ua| (ua.unit_id.as_str(), ua.available))
            .collect();
        Self {
            cells,
            availability,
        }
    }

    pub fn cell(&self, day: &str, index: usize) -> Option<GridCell<'a>> {
        let entry = *self.cells.get(&slot_key(day, index))?;
        let lecturer_available = entry
            .unit_id
            .as_deref()
            .and_then(|id| self.availability.get(id).copied());
        Some(GridCell {
            entry,
            lecturer_available,
        })
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, day: &str, start: &str) -> TimetableEntry {
        TimetableEntry {
            id: id.into(),
            day: Some(day.into()),
            start_time: Some(start.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_axis() {
        assert_eq!(DAYS.len(), 5);
        assert_eq!(TIME_SLOTS.len(), 9);
        assert_eq!(TIME_SLOTS[0], "08:00 - 09:00");
        assert_eq!(TIME_SLOTS[8], "16:00 - 17:00");
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index("08:00"), Some(0));
        assert_eq!(slot_index("9:30"), Some(1));
        assert_eq!(slot_index("16:00"), Some(8));
        assert_eq!(slot_index("17:00"), None);
        assert_eq!(slot_index("07:00"), None);
        assert_eq!(slot_index("noon"), None);
    }

    #[test]
    fn test_entry_slot_key() {
        assert_eq!(
            entry_slot_key(&entry("a", "Wednesday", "11:00")).as_deref(),
            Some("wednesday-3")
        );

        let explicit = TimetableEntry {
            time_slot_id: Some("Friday-2".into()),
            ..entry("b", "Monday", "08:00")
        };
        assert_eq!(entry_slot_key(&explicit).as_deref(), Some("friday-2"));

        let off_grid = entry("c", "Monday", "18:00");
        assert_eq!(entry_slot_key(&off_grid), None);
        assert_eq!(entry_slot_key(&TimetableEntry::default()), None);
    }

    #[test]
    fn test_first_entry_wins() {
        let entries = vec![entry("first", "Monday", "10:00"), entry("second", "Monday", "10:00")];
        let grid = Grid::build(&entries, &[]);
        assert_eq!(grid.cell("Monday", 2).map(|c| c.entry.id.as_str()), Some("first"));
        assert!(grid.cell("Monday", 3).is_none());
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_availability_dot() {
        let mut e = entry("x", "Tuesday", "08:00");
        e.unit_id = Some("u1".into());
        let other = TimetableEntry {
            unit_id: Some("u2".into()),
            ..entry("y", "Tuesday", "09:00")
        };
        let entries = vec![e, other];
        let availability = vec![UnitAvailability {
            unit_id: "u1".into(),
            available: false,
        }];
        let grid = Grid::build(&entries, &availability);
        assert_eq!(grid.cell("tuesday", 0).and_then(|c| c.lecturer_available), Some(false));
        assert_eq!(grid.cell("Tuesday", 1).and_then(|c| c.lecturer_available), None);
    }

    #[test]
    fn test_clash_reason_only_when_flagged() {
        let mut e = entry("x", "Monday", "08:00");
        e.clash_reason = Some("Room double-booked".into());
        let entries = vec![e];
        let grid = Grid::build(&entries, &[]);
        let cell = grid.cell("Monday", 0).unwrap();
        assert!(!cell.has_clash());
        assert_eq!(cell.clash_reason(), None);
    }
}
