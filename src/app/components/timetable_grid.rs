//! Weekly timetable grid.

use dioxus::prelude::*;
use timetable_types::{Course, Room, TimetableEntry, UnitAvailability};

use crate::schedule::grid::GridCell;
use crate::schedule::{Grid, DAYS, TIME_SLOTS};

/// Days across, one-hour slots down. `courses` and `rooms` resolve colours
/// and room names; `availability` adds the lecturer availability dot.
#[component]
pub fn TimetableGrid(
    entries: Vec<TimetableEntry>,
    #[props(default)] courses: Vec<Course>,
    #[props(default)] rooms: Vec<Room>,
    #[props(default)] availability: Vec<UnitAvailability>,
) -> Element {
    let grid = Grid::build(&entries, &availability);

    let rows: Vec<(usize, &str, Vec<Option<CellView>>)> = TIME_SLOTS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let cells = DAYS
                .iter()
                .map(|day| grid.cell(day, index).map(|c| CellView::new(c, &courses, &rooms)))
                .collect();
            (index, *label, cells)
        })
        .collect();

    rsx! {
        div { class: "timetable-grid",
            table {
                thead {
                    tr {
                        th { "Time" }
                        for day in DAYS {
                            th { key: "{day}", "{day}" }
                        }
                    }
                }
                tbody {
                    for (index, label, cells) in rows {
                        tr { key: "{index}",
                            th { scope: "row", small { "{label}" } }
                            for (day, cell) in DAYS.iter().zip(cells) {
                                td { key: "{day}",
                                    if let Some(cell) = cell {
                                        GridCellView { cell }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Owned, render-ready view of a [`GridCell`].
#[derive(Debug, Clone, PartialEq)]
struct CellView {
    code: String,
    title: String,
    unit: Option<String>,
    room: String,
    time: String,
    color: String,
    clash: bool,
    clash_reason: Option<String>,
    lecturer_available: Option<bool>,
}

impl CellView {
    fn new(cell: GridCell<'_>, courses: &[Course], rooms: &[Room]) -> Self {
        let entry = cell.entry;
        let course = entry
            .course_id
            .as_deref()
            .and_then(|id| courses.iter().find(|c| c.id == id));
        let room = entry
            .room_id
            .as_deref()
            .and_then(|id| rooms.iter().find(|r| r.id == id))
            .map(|r| r.name.clone())
            .or_else(|| entry.room_label().map(str::to_string))
            .unwrap_or_else(|| "TBA".to_string());

        Self {
            code: entry.course_label().unwrap_or("Class").to_string(),
            title: entry.course_title().unwrap_or_default().to_string(),
            unit: entry.unit_label().map(str::to_string),
            room,
            time: entry.time_range(),
            color: course
                .map(|c| c.color_or_default())
                .unwrap_or(timetable_types::course::DEFAULT_COURSE_COLOR)
                .to_string(),
            clash: cell.has_clash(),
            clash_reason: cell.clash_reason().map(str::to_string),
            lecturer_available: cell.lecturer_available,
        }
    }
}

#[component]
fn GridCellView(cell: CellView) -> Element {
    let class = if cell.clash { "grid-cell clash" } else { "grid-cell" };

    rsx! {
        div { class: "{class}", style: "--course-color: {cell.color};",
            match cell.lecturer_available {
                Some(true) => rsx! { span { class: "avail-dot available", title: "Lecturer available" } },
                Some(false) => rsx! { span { class: "avail-dot unavailable", title: "Lecturer unavailable" } },
                None => rsx! {},
            }
            strong { "{cell.code}" }
            if !cell.title.is_empty() && cell.title != cell.code {
                small { style: "display:block;", "{cell.title}" }
            }
            if let Some(unit) = &cell.unit {
                small { style: "display:block;", "{unit}" }
            }
            small { style: "display:block;", "{cell.room} · {cell.time}" }
            if cell.clash {
                span { class: "clash-indicator",
                    "⚠ Clash"
                    if let Some(reason) = &cell.clash_reason {
                        ": {reason}"
                    }
                }
            }
        }
    }
}
