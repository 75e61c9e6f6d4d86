//! Lecturer portal: dashboard, teaching schedule, courses and slot selection.

use dioxus::prelude::*;
use timetable_types::lecturer::{AvailabilityRequest, SelectSlotRequest};
use timetable_types::{Assignment, AvailableSlot, UnitAvailability};

use crate::app::components::{
    EmptyState, ErrorNotice, Modal, PageHeader, Spinner, StatsCard, StatusBadge, TimetableGrid,
};
use crate::app::hooks::{
    use_available_slots, use_lecturer_assignment, use_lecturer_assignments,
    use_lecturer_dashboard, use_unit_availability,
};
use crate::app::state::use_app;
use crate::app::Route;
use crate::query::Mutation;
use crate::schedule::slots::SlotRow;
use crate::schedule::summary::TeachingSummary;
use crate::schedule::{SlotSelection, SlotTable, DAYS};

#[component]
pub fn LecturerDashboard() -> Element {
    let state = use_app();
    let assignments = use_lecturer_assignments();
    let navigator = use_navigator();

    if assignments.is_loading() {
        return rsx! { Spinner {} };
    }

    let assignments = assignments.data_or_default();
    let summary = TeachingSummary::from_assignments(&assignments);
    let name = state
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Lecturer".to_string());
    let (pending, confirmed): (Vec<Assignment>, Vec<Assignment>) =
        assignments.into_iter().partition(Assignment::is_pending);

    rsx! {
        PageHeader {
            title: format!("Welcome, {name}!"),
            subtitle: "Here's your teaching schedule overview",
        }
        div { class: "stats-grid",
            StatsCard { title: "Total Assignments", value: summary.total.to_string(), description: "Units assigned to teach" }
            StatsCard { title: "Confirmed Classes", value: summary.confirmed.to_string(), description: "Ready to teach" }
            StatsCard { title: "Pending Schedule", value: summary.pending.to_string(), description: "Awaiting time selection" }
            StatsCard { title: "Total Students", value: summary.total_students.to_string(), description: "Across all classes" }
        }

        div { class: "grid",
            article {
                header {
                    strong { "Pending Assignments ({pending.len()})" }
                    small { style: "display:block;", "Select time slots for these units" }
                }
                if pending.is_empty() {
                    p { class: "muted centered", "No pending assignments" }
                }
                for assignment in pending {
                    div { key: "{assignment.id}", class: "list-item",
                        div { style: "display:flex;justify-content:space-between;",
                            div {
                                strong { "{assignment.course_label()}" }
                                small { style: "display:block;", "{assignment.unit_label()}" }
                                small { style: "display:block;", "Students: {assignment.student_count}" }
                            }
                            StatusBadge { confirmed: false }
                        }
                        button {
                            class: "outline",
                            onclick: move |_| { navigator.push(Route::LecturerAvailability {}); },
                            "Select Time Slot"
                        }
                    }
                }
            }
            article {
                header {
                    strong { "Confirmed Schedule ({confirmed.len()})" }
                    small { style: "display:block;", "Your scheduled classes" }
                }
                if confirmed.is_empty() {
                    p { class: "muted centered", "No confirmed assignments yet" }
                }
                for assignment in confirmed {
                    div { key: "{assignment.id}", class: "list-item",
                        div { style: "display:flex;justify-content:space-between;",
                            div {
                                strong { "{assignment.course_label()}" }
                                small { style: "display:block;", "{assignment.unit_label()}" }
                                small { style: "display:block;", "Room: {assignment.room_label()}" }
                            }
                            StatusBadge { confirmed: true }
                        }
                    }
                }
            }
        }
    }
}

/// Weekly grid from the lecturer dashboard, plus the confirmed class list.
#[component]
pub fn LecturerSchedule() -> Element {
    let dashboard = use_lecturer_dashboard();
    let availability = use_unit_availability();

    let Some(dashboard) = dashboard.data() else {
        return match dashboard.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let confirmed: Vec<Assignment> = dashboard
        .assignments
        .iter()
        .filter(|a| !a.is_pending())
        .cloned()
        .collect();

    rsx! {
        PageHeader {
            title: "Teaching Schedule",
            subtitle: format!("{} confirmed classes", confirmed.len()),
        }
        TimetableGrid {
            entries: dashboard.timetable.clone(),
            availability: availability.data_or_default(),
        }

        article { style: "margin-top:1.5rem;",
            header { strong { "Your Assigned Classes" } }
            if confirmed.is_empty() {
                p { class: "muted centered",
                    "No confirmed classes yet. Select time slots in Availability section."
                }
            } else {
                table {
                    thead {
                        tr {
                            th { "Course" }
                            th { "Unit" }
                            th { "Room" }
                            th { "Students" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for assignment in confirmed {
                            tr { key: "{assignment.id}",
                                td { "{assignment.course_label()}" }
                                td { "{assignment.unit_label()}" }
                                td {
                                    "{assignment.room_label()}"
                                    if let Some(house) = assignment.room_house.as_deref() {
                                        small { style: "display:block;", "House: {house}" }
                                    }
                                }
                                td { "{assignment.student_count}" }
                                td { "{assignment.class_status}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LecturerCourses() -> Element {
    let assignments = use_lecturer_assignments();

    let Some(assignments) = assignments.data() else {
        return match assignments.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };

    rsx! {
        PageHeader {
            title: "My Courses",
            subtitle: format!("{} courses assigned this semester", assignments.len()),
        }
        if assignments.is_empty() {
            EmptyState { title: "No courses", message: "No courses assigned yet" }
        } else {
            div { class: "card-grid",
                for assignment in assignments {
                    article { key: "{assignment.id}",
                        header { style: "display:flex;justify-content:space-between;",
                            div {
                                strong { "{assignment.course_label()}" }
                                small { style: "display:block;", "{assignment.unit_label()}" }
                            }
                            StatusBadge { confirmed: !assignment.is_pending() }
                        }
                        dl {
                            dt { small { "Course Code" } }
                            dd { "{assignment.course_code.clone().unwrap_or_else(|| \"N/A\".to_string())}" }
                            dt { small { "Unit Code" } }
                            dd { "{assignment.unit_code.clone().unwrap_or_else(|| \"N/A\".to_string())}" }
                            dt { small { "Room" } }
                            dd { "{assignment.room_label()}" }
                            dt { small { "Student Count" } }
                            dd { "{assignment.student_count} students" }
                        }
                    }
                }
            }
        }
    }
}

/// Time-slot selection for pending assignments, plus the lecturer's
/// teaching-day and per-unit availability.
#[component]
pub fn LecturerAvailability() -> Element {
    let assignments = use_lecturer_assignments();
    let navigator = use_navigator();
    let mut open = use_signal(|| Option::<Assignment>::None);

    let Some(assignments) = assignments.data() else {
        return match assignments.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let pending: Vec<Assignment> = assignments.iter().filter(|a| a.is_pending()).cloned().collect();

    rsx! {
        PageHeader {
            title: "Time Slot Selection",
            subtitle: "Select preferred time slots for your assigned units",
        }

        if pending.is_empty() {
            EmptyState {
                title: "All Set!",
                message: "You have selected time slots for all your assignments",
                action: rsx! {
                    button { onclick: move |_| { navigator.push(Route::LecturerDashboard {}); }, "Back to Dashboard" }
                },
            }
        } else {
            for assignment in pending {
                article { key: "{assignment.id}",
                    header { style: "display:flex;justify-content:space-between;",
                        div {
                            strong { "{assignment.course_label()}" }
                            small { style: "display:block;", "{assignment.unit_label()}" }
                        }
                        StatusBadge { confirmed: false }
                    }
                    div { class: "grid",
                        small { "Room: {assignment.room_label()}" }
                        small { "{assignment.student_count} students" }
                    }
                    button {
                        onclick: {
                            let assignment = assignment.clone();
                            move |_| open.set(Some(assignment.clone()))
                        },
                        "View Available Slots"
                    }
                }
            }
        }

        if let Some(assignment) = open() {
            SlotDialog {
                key: "{assignment.id}",
                assignment: assignment.clone(),
                on_close: move |_| open.set(None),
            }
        }

        TeachingDays {}
        UnitAvailabilityList { assignments }
    }
}

/// Slot tables for one assignment. Keyed by assignment id so the
/// selection starts empty each time the dialog opens.
#[component]
fn SlotDialog(assignment: Assignment, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let detail = use_lecturer_assignment(assignment.id.clone());
    let slots = use_available_slots(assignment.id.clone());
    let mut selection = use_signal(|| SlotSelection::new(assignment.id.clone()));
    let mut busy = use_signal(|| false);

    let select = move |slot: AvailableSlot| {
        if let Err(err) = selection.read().check(&slot) {
            state.error(err.title(), err.to_string());
            return;
        }
        let request = SelectSlotRequest::for_slot(selection.read().assignment_id(), &slot);
        busy.set(true);
        spawn(async move {
            let selected = state
                .mutate(Mutation::SelectTimeSlot, "Failed to select time slot", |api| async move {
                    api.select_time_slot(&request).await
                })
                .await;
            busy.set(false);
            if selected.is_some() {
                selection.write().record(&slot);
                state.success(format!("Time slot selected: {} {}", slot.day, slot.display));
                if selection.read().is_full() {
                    on_close.call(());
                }
            }
        });
    };

    let body = match (slots.data(), slots.error()) {
        (Some(list), _) => {
            let current = selection();
            let tables: Vec<(String, Vec<RowView>)> = SlotTable::all(&list)
                .into_iter()
                .map(|table| {
                    let rows = table.rows.iter().map(|row| RowView::new(row, &current)).collect();
                    (table.title(), rows)
                })
                .collect();
            if tables.is_empty() {
                rsx! { p { class: "muted", "No time slots available for this unit." } }
            } else {
                rsx! {
                    for (title, rows) in tables {
                        SlotTableView { key: "{title}", title: title.clone(), rows, busy: busy(), on_select: select }
                    }
                }
            }
        }
        (None, Some(message)) => rsx! { ErrorNotice { message } },
        (None, None) => rsx! { Spinner {} },
    };

    // The list row may be stale once slots are picked elsewhere
    let current = detail.data().unwrap_or(assignment);

    rsx! {
        Modal { title: "Select Time Slots for All Days", on_close: move |_| on_close.call(()),
            p {
                "{current.course_label()} - {current.unit_label()}"
                small { style: "display:block;",
                    "Room: {current.room_label()} · {current.student_count} students"
                }
                small { style: "display:block;",
                    "Select up to {selection.read().max()} time slots per week ({selection.read().progress_label()})"
                }
            }
            {body}
        }
    }
}

/// What a slot table cell shows.
#[derive(Debug, Clone, PartialEq)]
enum CellState {
    Empty,
    Selected,
    Open(AvailableSlot),
    Booked,
}

#[derive(Debug, Clone, PartialEq)]
struct RowView {
    display: String,
    cells: Vec<CellState>,
}

impl RowView {
    fn new(row: &SlotRow<'_>, selection: &SlotSelection) -> Self {
        let cells = row
            .cells
            .iter()
            .map(|cell| match cell {
                None => CellState::Empty,
                Some(slot) if selection.is_selected(slot) => CellState::Selected,
                Some(slot) if slot.is_free() => CellState::Open((*slot).clone()),
                Some(_) => CellState::Booked,
            })
            .collect();
        Self {
            display: row.display.clone(),
            cells,
        }
    }
}

#[component]
fn SlotTableView(title: String, rows: Vec<RowView>, busy: bool, on_select: EventHandler<AvailableSlot>) -> Element {
    rsx! {
        h5 { "{title}" }
        div { class: "overflow-auto",
            table { class: "slot-table",
                thead {
                    tr {
                        th { "Time Slot" }
                        for day in DAYS {
                            th { key: "{day}", "{day}" }
                        }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.display}",
                            th { scope: "row", "{row.display}" }
                            for (day, cell) in DAYS.iter().zip(row.cells.iter().cloned()) {
                                td { key: "{day}",
                                    {match cell {
                                        CellState::Empty => rsx! { small { class: "muted", "-" } },
                                        CellState::Selected => rsx! { span { class: "slot-selected", "✓ Selected" } },
                                        CellState::Booked => rsx! { span { class: "slot-booked", "Booked" } },
                                        CellState::Open(slot) => rsx! {
                                            button {
                                                class: "outline",
                                                disabled: busy,
                                                onclick: move |_| on_select.call(slot.clone()),
                                                "Select"
                                            }
                                        },
                                    }}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Weekdays the lecturer is willing to teach.
#[component]
fn TeachingDays() -> Element {
    let state = use_app();
    let mut days = use_signal(|| DAYS.iter().map(|d| d.to_string()).collect::<Vec<_>>());
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let request = AvailabilityRequest { days: days() };
        if request.days.is_empty() {
            state.error("No days selected", "Pick at least one teaching day");
            return;
        }
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(
                    Mutation::SetLecturerAvailability,
                    "Failed to save availability",
                    |api| async move { api.set_lecturer_availability(&request).await },
                )
                .await;
            if saved.is_some() {
                state.success("Teaching days updated");
            }
            saving.set(false);
        });
    };

    rsx! {
        article { style: "margin-top:1.5rem;",
            header { strong { "Teaching Days" } }
            fieldset { class: "grid",
                for day in DAYS {
                    label { key: "{day}",
                        input {
                            r#type: "checkbox",
                            checked: days.read().iter().any(|d| d == day),
                            onchange: move |_| {
                                let mut days = days.write();
                                if let Some(pos) = days.iter().position(|d| d == day) {
                                    days.remove(pos);
                                } else {
                                    days.push(day.to_string());
                                }
                            },
                        }
                        "{day}"
                    }
                }
            }
            button { class: "secondary", aria_busy: "{saving}", disabled: saving(), onclick: save, "Save Days" }
        }
    }
}

fn is_available(availability: &[UnitAvailability], unit_id: &str) -> Option<bool> {
    availability
        .iter()
        .find(|a| a.unit_id == unit_id)
        .map(|a| a.available)
}

/// Per-unit availability switches. Units with no record count as available.
#[component]
fn UnitAvailabilityList(assignments: Vec<Assignment>) -> Element {
    let state = use_app();
    let availability = use_unit_availability();
    let records = availability.data_or_default();

    let toggle = move |(unit_id, available): (String, bool)| {
        spawn(async move {
            let saved = state
                .mutate(
                    Mutation::SetUnitAvailability,
                    "Failed to update availability",
                    |api| async move { api.set_unit_availability(&unit_id, available).await },
                )
                .await;
            if saved.is_some() {
                let message = if available {
                    "Marked available"
                } else {
                    "Marked unavailable"
                };
                state.success(message);
            }
        });
    };

    rsx! {
        article {
            header {
                strong { "Unit Availability" }
                small { style: "display:block;", "Shown to administrators on the timetable" }
            }
            if assignments.is_empty() {
                p { class: "muted", "No units assigned yet" }
            }
            for assignment in assignments {
                label { key: "{assignment.id}",
                    input {
                        r#type: "checkbox",
                        role: "switch",
                        checked: is_available(&records, &assignment.unit_id).unwrap_or(true),
                        onchange: {
                            let unit_id = assignment.unit_id.clone();
                            let available = is_available(&records, &assignment.unit_id).unwrap_or(true);
                            move |_| toggle((unit_id.clone(), !available))
                        },
                    }
                    "{assignment.unit_label()}"
                    small { " · {assignment.course_label()}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_types::SlotStatus;

    fn slot(day: &str, status: SlotStatus) -> AvailableSlot {
        AvailableSlot {
            day: day.into(),
            start_time: "08:00".into(),
            end_time: "10:00".into(),
            display: "8:00 AM - 10:00 AM".into(),
            duration: "2 hours".into(),
            status,
        }
    }

    #[test]
    fn test_row_view_cells() {
        let slots = vec![
            slot("Monday", SlotStatus::Green),
            slot("Tuesday", SlotStatus::Red),
            slot("Thursday", SlotStatus::Green),
        ];
        let mut selection = SlotSelection::new("a1");
        selection.record(&slots[2]);

        let tables = SlotTable::all(&slots);
        assert_eq!(tables.len(), 1);
        let row = RowView::new(&tables[0].rows[0], &selection);

        assert_eq!(row.display, "8:00 AM - 10:00 AM");
        assert_eq!(row.cells[0], CellState::Open(slots[0].clone()));
        assert_eq!(row.cells[1], CellState::Booked);
        assert_eq!(row.cells[2], CellState::Empty);
        assert_eq!(row.cells[3], CellState::Selected);
        assert_eq!(row.cells[4], CellState::Empty);
    }

    #[test]
    fn test_unit_without_record_is_unknown() {
        let records = vec![UnitAvailability {
            unit_id: "u1".into(),
            available: false,
        }];
        assert_eq!(is_available(&records, "u1"), Some(false));
        assert_eq!(is_available(&records, "u2"), None);
    }
}
