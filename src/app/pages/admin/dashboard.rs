use dioxus::prelude::*;
use timetable_types::timetable::GenerateRequest;

use super::{current_academic_year, department_options};
use crate::app::components::{NumberField, PageHeader, SelectField, Spinner, StatsCard};
use crate::app::hooks::{use_courses, use_departments, use_rooms, use_timetable_stats, use_users};
use crate::app::state::use_app;
use crate::app::Route;
use crate::query::Mutation;
use crate::schedule::summary::AdminSummary;

#[component]
pub fn AdminDashboard() -> Element {
    let courses = use_courses();
    let rooms = use_rooms();
    let users = use_users();
    let navigator = use_navigator();
    let semester = use_signal(|| 1u32);
    let academic_year = use_signal(current_academic_year);

    if courses.is_loading() || rooms.is_loading() || users.is_loading() {
        return rsx! { Spinner {} };
    }

    let summary = AdminSummary::from_lists(
        &courses.data_or_default(),
        &rooms.data_or_default(),
        &users.data_or_default(),
    );

    rsx! {
        PageHeader {
            title: "Admin Dashboard",
            subtitle: "Manage timetables, courses, departments, and users",
        }

        div { class: "stats-grid",
            StatsCard { title: "Total Courses", value: summary.courses.to_string(), description: "Academic programs" }
            StatsCard { title: "Available Rooms", value: summary.rooms.to_string() }
            StatsCard {
                title: "Total Users",
                value: summary.users.to_string(),
                description: format!("{} students, {} lecturers", summary.students, summary.lecturers),
            }
            StatsCard {
                title: "Unassigned Units",
                value: summary.unassigned_units.to_string(),
                description: format!("of {} units", summary.units),
            }
        }

        div { class: "grid",
            TimetableStatus {
                key: "{semester}-{academic_year}",
                semester: semester(),
                academic_year: academic_year(),
            }
            GenerateTimetable { semester, academic_year }
        }

        article {
            header { strong { "Quick Actions" } }
            div { class: "actions",
                button { class: "outline", onclick: move |_| { navigator.push(Route::AdminCourses {}); }, "Manage Courses" }
                button { class: "outline", onclick: move |_| { navigator.push(Route::AdminRooms {}); }, "Manage Rooms" }
                button { class: "outline", onclick: move |_| { navigator.push(Route::AdminDepartments {}); }, "Departments" }
                button { class: "outline", onclick: move |_| { navigator.push(Route::AdminTimetable {}); }, "View Timetable" }
                button { class: "outline", onclick: move |_| { navigator.push(Route::AdminUsers {}); }, "Manage Users" }
                AssignRooms {}
            }
        }
    }
}

/// Figures for one semester. Keyed by semester and year so a new pair
/// gets its own query.
#[component]
fn TimetableStatus(semester: u32, academic_year: u32) -> Element {
    let stats = use_timetable_stats(semester, academic_year);
    let navigator = use_navigator();
    let stats = stats.data_or_default();
    let clashes = stats.clash_count;

    rsx! {
        article {
            header { strong { "System Status" } }
            small { "Semester {semester}, {academic_year}" }
            dl {
                dt { small { "Timetable entries" } }
                dd { "{stats.total_timetable_entries}" }
                dt { small { "Active classes" } }
                dd { "{stats.active_classes}" }
                dt { small { "Assignments confirmed" } }
                dd { "{stats.confirmed_assignments} of {stats.total_assignments}" }
                dt { small { "Clashes detected" } }
                dd { "{clashes}" }
            }
            progress {
                value: "{stats.confirmed_assignments}",
                max: "{stats.total_assignments.max(1)}",
            }
            if clashes > 0 {
                footer {
                    strong { "Scheduling Conflicts Detected" }
                    p {
                        "Found {clashes} clash"
                        if clashes != 1 { "es" }
                        " in the current timetable. Review and resolve conflicts to ensure optimal scheduling."
                    }
                    button { onclick: move |_| { navigator.push(Route::AdminTimetable {}); }, "View Conflicts" }
                }
            }
        }
    }
}

/// Semester/year picker and the generate button.
#[component]
fn GenerateTimetable(semester: Signal<u32>, academic_year: Signal<u32>) -> Element {
    let state = use_app();
    let departments = use_departments();
    let department = use_signal(String::new);
    let mut generating = use_signal(|| false);

    let generate = move |_| {
        let request = GenerateRequest {
            semester: semester(),
            academic_year: academic_year(),
            department_id: super::optional(&department()),
        };
        if !(1..=2).contains(&request.semester) {
            state.error("Invalid Semester", "Semester must be 1 or 2");
            return;
        }
        generating.set(true);
        state.info(
            "Generating Timetable",
            "Running optimization algorithm... This may take a moment.",
        );
        spawn(async move {
            let result = state
                .mutate(
                    Mutation::GenerateTimetable,
                    "Failed to generate timetable",
                    |api| async move { api.generate_timetable(&request).await },
                )
                .await;
            if let Some(result) = result {
                tracing::info!(
                    "Timetable generated: {} entries, {} clashes",
                    result.generated_entries,
                    result.clashes_detected
                );
                state.success(format!(
                    "Timetable generated with {} entries and {} detected clashes.",
                    result.generated_entries, result.clashes_detected
                ));
            }
            generating.set(false);
        });
    };

    rsx! {
        article {
            header { strong { "Generate Timetable" } }
            div { class: "grid",
                NumberField { label: "Semester", value: semester, min: 1, disabled: generating() }
                NumberField { label: "Academic Year", value: academic_year, min: 2000, disabled: generating() }
            }
            SelectField {
                label: "Department",
                value: department,
                options: department_options(&departments.data_or_default()),
                placeholder: "All departments",
                disabled: generating(),
            }
            button {
                aria_busy: "{generating}",
                disabled: generating(),
                onclick: generate,
                if generating() { "Generating..." } else { "Generate Timetable" }
            }
        }
    }
}

#[component]
fn AssignRooms() -> Element {
    let state = use_app();
    let mut busy = use_signal(|| false);

    let assign = move |_| {
        busy.set(true);
        state.info("Assigning Rooms to Units", "Running room assignment algorithm...");
        spawn(async move {
            let result = state
                .mutate(Mutation::AssignRoomsToUnits, "Failed to assign rooms", |api| async move {
                    api.assign_rooms_to_units().await
                })
                .await;
            if let Some(result) = result {
                state.success(format!(
                    "Assigned rooms to {} units. {} units failed.",
                    result.summary.assigned, result.summary.failed
                ));
            }
            busy.set(false);
        });
    };

    rsx! {
        button { aria_busy: "{busy}", disabled: busy(), onclick: assign, "Assign Rooms to Units" }
    }
}
