//! Student clash alerts.
//!
//! Entries are grouped by day and start time; any group holding more than
//! one class is a clash. Only identical start times are caught. Two classes
//! that overlap but start at different times are not reported.

use std::collections::HashMap;

use timetable_types::TimetableEntry;

/// A set of classes sharing a day and start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clash {
    /// `clash-N`, numbered in order of first appearance
    pub id: String,
    pub courses: Vec<String>,
    pub day: String,
    pub start_time: String,
    /// End time of the first entry in the group
    pub end_time: String,
    pub rooms: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn course_name(entry: &TimetableEntry) -> String {
    non_empty(&entry.course_name)
        .or_else(|| non_empty(&entry.course_code))
        .unwrap_or("Unknown")
        .to_string()
}

fn room_name(entry: &TimetableEntry) -> String {
    non_empty(&entry.room_name)
        .or_else(|| non_empty(&entry.room))
        .unwrap_or("TBA")
        .to_string()
}

pub fn detect_clashes(entries: &[TimetableEntry]) -> Vec<Clash> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut groups: HashMap<(&str, &str), Vec<&TimetableEntry>> = HashMap::new();

    for entry in entries {
        let day = non_empty(&entry.day).unwrap_or("N/A");
        let start = entry.start_time.as_deref().unwrap_or("");
        groups
            .entry((day, start))
            .or_insert_with(|| {
                order.push((day, start));
                Vec::new()
            })
            .push(entry);
    }

    order
        .into_iter()
        .filter_map(|slot| {
            let group = groups.get(&slot).filter(|g| g.len() > 1)?;
            Some((slot, group))
        })
        .enumerate()
        .map(|(n, ((day, start), group))| Clash {
            id: format!("clash-{n}"),
            courses: group.iter().map(|e| course_name(e)).collect(),
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: group
                .first()
                .and_then(|e| non_empty(&e.end_time))
                .unwrap_or("Unknown")
                .to_string(),
            rooms: group.iter().map(|e| room_name(e)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(course: &str, day: Option<&str>, start: &str, end: Option<&str>) -> TimetableEntry {
        TimetableEntry {
            course_name: Some(course.into()),
            day: day.map(Into::into),
            start_time: Some(start.into()),
            end_time: end.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_clashes() {
        let entries = vec![
            entry("Maths", Some("Monday"), "08:00", Some("10:00")),
            entry("Physics", Some("Monday"), "10:00", Some("12:00")),
            entry("Chemistry", Some("Tuesday"), "08:00", Some("10:00")),
        ];
        assert!(detect_clashes(&entries).is_empty());
        assert!(detect_clashes(&[]).is_empty());
    }

    #[test]
    fn test_same_start_is_clash() {
        let mut b = entry("Physics", Some("Monday"), "08:00", Some("11:00"));
        b.room = Some("LH2".into());
        let mut a = entry("Maths", Some("Monday"), "08:00", Some("10:00"));
        a.room_name = Some("LH1".into());
        let clashes = detect_clashes(&[a, b]);

        assert_eq!(clashes.len(), 1);
        let clash = &clashes[0];
        assert_eq!(clash.id, "clash-0");
        assert_eq!(clash.courses, vec!["Maths", "Physics"]);
        assert_eq!(clash.rooms, vec!["LH1", "LH2"]);
        assert_eq!(clash.day, "Monday");
        assert_eq!(clash.start_time, "08:00");
        assert_eq!(clash.end_time, "10:00");
    }

    #[test]
    fn test_partial_overlap_not_detected() {
        let entries = vec![
            entry("Maths", Some("Monday"), "08:00", Some("10:00")),
            entry("Physics", Some("Monday"), "09:00", Some("11:00")),
        ];
        assert!(detect_clashes(&entries).is_empty());
    }

    #[test]
    fn test_fallbacks() {
        let mut unnamed = TimetableEntry {
            start_time: Some("14:00".into()),
            course_code: Some("CS101".into()),
            ..Default::default()
        };
        unnamed.course_name = None;
        let nothing = TimetableEntry {
            start_time: Some("14:00".into()),
            ..Default::default()
        };
        let clashes = detect_clashes(&[unnamed, nothing]);

        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].day, "N/A");
        assert_eq!(clashes[0].courses, vec!["CS101", "Unknown"]);
        assert_eq!(clashes[0].rooms, vec!["TBA", "TBA"]);
        assert_eq!(clashes[0].end_time, "Unknown");
    }

    #[test]
    fn test_first_appearance_order() {
        let entries = vec![
            entry("A", Some("Friday"), "12:00", None),
            entry("B", Some("Monday"), "08:00", None),
            entry("C", Some("Monday"), "08:00", None),
            entry("D", Some("Friday"), "12:00", None),
            entry("E", Some("Friday"), "12:00", None),
        ];
        let clashes = detect_clashes(&entries);
        assert_eq!(clashes.len(), 2);
        assert_eq!(clashes[0].id, "clash-0");
        assert_eq!(clashes[0].day, "Friday");
        assert_eq!(clashes[0].courses, vec!["A", "D", "E"]);
        assert_eq!(clashes[1].id, "clash-1");
        assert_eq!(clashes[1].day, "Monday");
    }
}
