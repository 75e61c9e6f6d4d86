//! Lecturer time-slot selection.
//!
//! A lecturer picks at most [`MAX_SLOTS_PER_UNIT`] weekly slots for each
//! assignment. The backend enforces the cap as well; the check here only
//! stops a request that would certainly be refused.

use thiserror::Error;
use timetable_types::AvailableSlot;

use super::grid::DAYS;

pub const MAX_SLOTS_PER_UNIT: usize = 2;

/// Durations offered by `/lecturer/available-slots`, in display order.
pub const DURATIONS: [&str; 2] = ["2 hours", "3 hours"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotSelectionError {
    #[error("You can only select maximum {max} time slots per unit per week")]
    LimitReached { max: usize },

    #[error("That time slot is already booked")]
    Booked,

    #[error("That time slot is already selected")]
    AlreadySelected,
}

impl SlotSelectionError {
    /// Short heading for the notification.
    pub fn title(&self) -> &'static str {
        match self {
            Self::LimitReached { .. } => "Limit Reached",
            Self::Booked => "Slot Unavailable",
            Self::AlreadySelected => "Already Selected",
        }
    }
}

/// Slots chosen for one assignment while its selection dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSelection {
    assignment_id: String,
    selected: Vec<String>,
    max: usize,
}

impl SlotSelection {
    pub fn new(assignment_id: impl Into<String>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            selected: Vec::new(),
            max: MAX_SLOTS_PER_UNIT,
        }
    }

    pub fn assignment_id(&self) -> &str {
        &self.assignment_id
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max
    }

    pub fn is_selected(&self, slot: &AvailableSlot) -> bool {
        self.selected.contains(&slot.key())
    }

    /// Whether `slot` may be requested. Call before sending the request.
    pub fn check(&self, slot: &AvailableSlot) -> Result<(), SlotSelectionError> {
        if self.is_full() {
            return Err(SlotSelectionError::LimitReached { max: self.max });
        }
        if self.is_selected(slot) {
            return Err(SlotSelectionError::AlreadySelected);
        }
        if !slot.is_free() {
            return Err(SlotSelectionError::Booked);
        }
        Ok(())
    }

    /// Record a slot the backend accepted.
    pub fn record(&mut self, slot: &AvailableSlot) {
        let key = slot.key();
        if !self.selected.contains(&key) {
            self.selected.push(key);
        }
    }

    /// "Selected: 1/2"
    pub fn progress_label(&self) -> String {
        format!("Selected: {}/{}", self.count(), self.max)
    }
}

/// One row of a [`SlotTable`]: a start-end pair across the weekdays.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow<'a> {
    pub display: String,
    pub start_time: String,
    pub end_time: String,
    /// One cell per entry of [`DAYS`]
    pub cells: Vec<Option<&'a AvailableSlot>>,
}

/// Slots of one duration laid out as time rows by weekday columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTable<'a> {
    pub duration: String,
    pub rows: Vec<SlotRow<'a>>,
}

impl<'a> SlotTable<'a> {
    /// Table for `duration`, or `None` if no slot has that duration.
    pub fn build(slots: &'a [AvailableSlot], duration: &str) -> Option<Self> {
        let mut rows: Vec<SlotRow<'a>> = Vec::new();
        for slot in slots.iter().filter(|s| s.duration == duration) {
            let exists = rows
                .iter()
                .any(|r| r.start_time == slot.start_time && r.end_time == slot.end_time);
            if exists {
                continue;
            }
            let cells = DAYS
                .iter()
                .map(|day| {
                    slots.iter().find(|s| {
                        s.duration == duration
                            && s.day == *day
                            && s.start_time == slot.start_time
                            && s.end_time == slot.end_time
                    })
                })
                .collect();
            rows.push(SlotRow {
                display: slot.display.clone(),
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                cells,
            });
        }
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            duration: duration.to_string(),
            rows,
        })
    }

    /// A table per known duration that has slots.
    pub fn all(slots: &'a [AvailableSlot]) -> Vec<Self> {
        DURATIONS
            .iter()
            .filter_map(|d| Self::build(slots, d))
            .collect()
    }

    /// "2-Hour Lectures"
    pub fn title(&self) -> String {
        let hours = self.duration.split_whitespace().next().unwrap_or("");
        format!("{hours}-Hour Lectures")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_types::SlotStatus;

    fn slot(day: &str, start: &str, end: &str, duration: &str, status: SlotStatus) -> AvailableSlot {
        AvailableSlot {
            day: day.into(),
            start_time: start.into(),
            end_time: end.into(),
            display: format!("{start} - {end}"),
            duration: duration.into(),
            status,
        }
    }

    #[test]
    fn test_limit_reached_on_third() {
        let a = slot("Monday", "08:00", "10:00", "2 hours", SlotStatus::Green);
        let b = slot("Tuesday", "08:00", "10:00", "2 hours", SlotStatus::Green);
        let c = slot("Friday", "08:00", "10:00", "2 hours", SlotStatus::Green);

        let mut selection = SlotSelection::new("a1");
        assert!(selection.check(&a).is_ok());
        selection.record(&a);
        assert!(selection.check(&b).is_ok());
        selection.record(&b);

        let err = selection.check(&c).unwrap_err();
        assert_eq!(err, SlotSelectionError::LimitReached { max: 2 });
        assert_eq!(err.title(), "Limit Reached");
        assert_eq!(
            err.to_string(),
            "You can only select maximum 2 time slots per unit per week"
        );
        assert_eq!(selection.progress_label(), "Selected: 2/2");
    }

    #[test]
    fn test_booked_and_duplicate() {
        let booked = slot("Monday", "08:00", "10:00", "2 hours", SlotStatus::Red);
        let free = slot("Monday", "10:00", "12:00", "2 hours", SlotStatus::Green);
        let mut selection = SlotSelection::new("a1");

        assert_eq!(selection.check(&booked), Err(SlotSelectionError::Booked));
        selection.record(&free);
        assert_eq!(selection.check(&free), Err(SlotSelectionError::AlreadySelected));
        // Recording twice does not double count
        selection.record(&free);
        assert_eq!(selection.count(), 1);
        assert!(selection.is_selected(&free));
    }

    #[test]
    fn test_table_rows_and_columns() {
        let slots = vec![
            slot("Monday", "08:00", "10:00", "2 hours", SlotStatus::Green),
            slot("Wednesday", "08:00", "10:00", "2 hours", SlotStatus::Red),
            slot("Monday", "10:00", "12:00", "2 hours", SlotStatus::Green),
            slot("Monday", "08:00", "11:00", "3 hours", SlotStatus::Green),
        ];

        let table = SlotTable::build(&slots, "2 hours").unwrap();
        assert_eq!(table.title(), "2-Hour Lectures");
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.start_time, "08:00");
        assert_eq!(first.cells.len(), DAYS.len());
        assert!(first.cells[0].is_some_and(|s| s.is_free()));
        assert!(first.cells[1].is_none());
        assert!(first.cells[2].is_some_and(|s| !s.is_free()));

        let tables = SlotTable::all(&slots);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].title(), "3-Hour Lectures");
    }

    #[test]
    fn test_no_table_without_slots() {
        let slots = vec![slot("Monday", "08:00", "10:00", "2 hours", SlotStatus::Green)];
        assert!(SlotTable::build(&slots, "3 hours").is_none());
        assert_eq!(SlotTable::all(&slots).len(), 1);
    }
}
