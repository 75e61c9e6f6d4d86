use dioxus::prelude::*;
use timetable_types::timetable::NewTimeslot;

use super::current_academic_year;
use crate::app::components::{
    EmptyState, ErrorNotice, Modal, NumberField, PageHeader, SelectField, Spinner, TextField,
    TimetableGrid,
};
use crate::app::hooks::{use_all_unit_availability, use_courses, use_rooms, use_timetable};
use crate::app::state::use_app;
use crate::query::Mutation;
use crate::schedule::DAYS;
use crate::validation::validate_timeslot;

#[component]
pub fn AdminTimetable() -> Element {
    let timetable = use_timetable();
    let courses = use_courses();
    let rooms = use_rooms();
    let availability = use_all_unit_availability();
    let mut adding = use_signal(|| false);

    let body = match (timetable.data(), timetable.error()) {
        (Some(entries), _) if entries.is_empty() => rsx! {
            EmptyState {
                title: "No timetable yet",
                message: "Generate a timetable from the dashboard once courses, rooms and time slots are in place.",
            }
        },
        (Some(entries), _) => rsx! {
            TimetableGrid {
                entries,
                courses: courses.data_or_default(),
                rooms: rooms.data_or_default(),
                availability: availability.data_or_default(),
            }
        },
        (None, Some(message)) => rsx! { ErrorNotice { message } },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        PageHeader {
            title: "Master Timetable",
            subtitle: "Complete schedule overview",
            actions: rsx! {
                button { class: "outline", onclick: move |_| adding.set(true), "Add Time Slot" }
            },
        }
        article { {body} }
        if adding() {
            TimeslotForm { on_close: move |_| adding.set(false) }
        }
    }
}

#[component]
fn TimeslotForm(on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let day = use_signal(|| DAYS[0].to_string());
    let start_time = use_signal(|| "08:00".to_string());
    let end_time = use_signal(|| "10:00".to_string());
    let duration = use_signal(|| 2u32);
    let semester = use_signal(|| 1u32);
    let academic_year = use_signal(current_academic_year);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let slot = NewTimeslot {
            day: day(),
            start_time: start_time().trim().to_string(),
            end_time: end_time().trim().to_string(),
            duration_hours: duration(),
            semester: semester(),
            academic_year: academic_year(),
        };
        if let Err(err) = validate_timeslot(&slot) {
            state.invalid(&err);
            return;
        }
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::AddTimeslot, "Failed to add time slot", |api| async move {
                    api.create_timeslot(&slot).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                state.success("Time slot added");
                on_close.call(());
            }
        });
    };

    let days: Vec<(String, String)> = DAYS.iter().map(|d| (d.to_string(), d.to_string())).collect();

    rsx! {
        Modal { title: "Add Time Slot", on_close: move |_| on_close.call(()),
            form { onsubmit,
                SelectField { label: "Day", value: day, options: days, disabled: saving() }
                div { class: "grid",
                    TextField { label: "Start Time", value: start_time, kind: "time", disabled: saving() }
                    TextField { label: "End Time", value: end_time, kind: "time", disabled: saving() }
                    NumberField { label: "Duration (hours)", value: duration, min: 1, disabled: saving() }
                }
                div { class: "grid",
                    NumberField { label: "Semester", value: semester, min: 1, disabled: saving() }
                    NumberField { label: "Academic Year", value: academic_year, min: 2000, disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Add Time Slot" }
            }
        }
    }
}
