//! Course catalogue and per-course unit management.

use dioxus::prelude::*;
use timetable_types::course::{CourseUpdate, NewCourse, NewUnit};
use timetable_types::{Course, Unit, User};

use super::{department_options, lecturers, optional, room_options};
use crate::app::components::{
    CourseCard, EmptyState, ErrorNotice, Modal, NumberField, PageHeader, SelectField, Spinner,
    TextField,
};
use crate::app::hooks::{use_courses, use_departments, use_rooms, use_users};
use crate::app::state::use_app;
use crate::app::Route;
use crate::query::Mutation;
use crate::validation::{validate_course, validate_lecturer_email, validate_unit};

const DEFAULT_COLOR: &str = "#0ea5a4";

/// Which course dialog is open.
#[derive(Clone, PartialEq)]
enum Dialog {
    Add,
    Edit(Course),
    Delete(Course),
}

#[component]
pub fn AdminCourses() -> Element {
    let courses = use_courses();
    let users = use_users();
    let departments = use_departments();
    let navigator = use_navigator();
    let mut search = use_signal(String::new);
    let mut dialog = use_signal(|| Option::<Dialog>::None);

    let Some(all) = courses.data() else {
        return match courses.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let query = search();
    let shown: Vec<Course> = all.iter().filter(|c| c.matches(&query)).cloned().collect();
    let lecturer_list = lecturers(&users.data_or_default());
    let department_list = departments.data_or_default();

    rsx! {
        PageHeader {
            title: "Courses",
            subtitle: format!("{} courses", all.len()),
            actions: rsx! {
                button { onclick: move |_| dialog.set(Some(Dialog::Add)), "Add Course" }
            },
        }
        input {
            r#type: "search",
            placeholder: "Search courses by code or name...",
            value: "{search}",
            oninput: move |evt| search.set(evt.value()),
        }

        if shown.is_empty() {
            EmptyState {
                title: "No courses",
                message: if all.is_empty() { "Add a course to get started" } else { "No courses match your search" },
            }
        } else {
            div { class: "card-grid",
                for course in shown {
                    CourseCard {
                        key: "{course.id}",
                        course: course.clone(),
                        lecturers: lecturer_list.clone(),
                        departments: department_list.clone(),
                        footer: rsx! {
                            div { class: "actions",
                                button {
                                    class: "outline",
                                    onclick: {
                                        let id = course.id.clone();
                                        move |_| { navigator.push(Route::AdminCourseDetail { course_id: id.clone() }); }
                                    },
                                    "Manage"
                                }
                                button {
                                    class: "outline secondary",
                                    onclick: {
                                        let course = course.clone();
                                        move |_| dialog.set(Some(Dialog::Edit(course.clone())))
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "outline contrast",
                                    onclick: {
                                        let course = course.clone();
                                        move |_| dialog.set(Some(Dialog::Delete(course.clone())))
                                    },
                                    "Delete"
                                }
                            }
                        },
                    }
                }
            }
        }

        {match dialog() {
            Some(Dialog::Add) => rsx! { AddCourseForm { on_close: move |_| dialog.set(None) } },
            Some(Dialog::Edit(course)) => rsx! {
                EditCourseForm { key: "{course.id}", course: course.clone(), on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Delete(course)) => rsx! {
                DeleteCourse { course, on_close: move |_| dialog.set(None) }
            },
            None => rsx! {},
        }}
    }
}

#[component]
fn AddCourseForm(on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let departments = use_departments();
    let rooms = use_rooms();
    let code = use_signal(String::new);
    let name = use_signal(String::new);
    let department = use_signal(String::new);
    let room = use_signal(String::new);
    let duration = use_signal(|| 3u32);
    let color = use_signal(|| DEFAULT_COLOR.to_string());
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let department_id = department();
        let course = NewCourse {
            code: code().trim().to_string(),
            name: name().trim().to_string(),
            // Colleges are not modelled separately; the department stands in
            college_id: department_id.clone(),
            department_id,
            duration_years: duration(),
            room_id: optional(&room()),
            color: optional(&color()),
        };
        if let Err(err) = validate_course(&course) {
            state.invalid(&err);
            return;
        }
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::AddCourse, "Failed to add course", |api| async move {
                    api.create_course(&course).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                state.success("Course added");
                on_close.call(());
            }
        });
    };

    rsx! {
        Modal { title: "Add Course", on_close: move |_| on_close.call(()),
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Course Code", value: code, placeholder: "BSC-CS", disabled: saving() }
                    TextField { label: "Course Name", value: name, disabled: saving() }
                }
                SelectField {
                    label: "Department",
                    value: department,
                    options: department_options(&departments.data_or_default()),
                    placeholder: "Select a department",
                    disabled: saving(),
                }
                SelectField {
                    label: "Default Room",
                    value: room,
                    options: room_options(&rooms.data_or_default()),
                    placeholder: "No default room",
                    disabled: saving(),
                }
                div { class: "grid",
                    NumberField { label: "Duration (years)", value: duration, min: 1, disabled: saving() }
                    TextField { label: "Colour", value: color, kind: "color", disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Add Course" }
            }
        }
    }
}

/// Fields of `edited` that differ from `course`.
fn course_changes(course: &Course, edited: &CourseUpdate) -> CourseUpdate {
    let changed = |new: &Option<String>, old: &str| new.clone().filter(|n| n != old);
    CourseUpdate {
        code: changed(&edited.code, &course.code),
        name: changed(&edited.name, &course.name),
        department_id: changed(
            &edited.department_id,
            course.department_id.as_deref().unwrap_or_default(),
        ),
        duration_years: edited.duration_years.filter(|d| Some(*d) != course.duration_years),
        color: changed(&edited.color, course.color.as_deref().unwrap_or_default()),
    }
}

#[component]
fn EditCourseForm(course: Course, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let departments = use_departments();
    let code = use_signal(|| course.code.clone());
    let name = use_signal(|| course.name.clone());
    let department = use_signal(|| course.department_id.clone().unwrap_or_default());
    let duration = use_signal(|| course.duration_years.unwrap_or(3));
    let color = use_signal(|| course.color_or_default().to_string());
    let mut saving = use_signal(|| false);

    let original = course.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let edited = CourseUpdate {
            code: optional(&code()),
            name: optional(&name()),
            department_id: optional(&department()),
            duration_years: Some(duration()).filter(|d| *d > 0),
            color: optional(&color()),
        };
        let update = course_changes(&original, &edited);
        if update == CourseUpdate::default() {
            on_close.call(());
            return;
        }
        let id = original.id.clone();
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::UpdateCourse, "Failed to update course", |api| async move {
                    api.update_course(&id, &update).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                state.success("Course updated");
                on_close.call(());
            }
        });
    };

    rsx! {
        Modal { title: format!("Edit {}", course.code), on_close: move |_| on_close.call(()),
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Course Code", value: code, disabled: saving() }
                    TextField { label: "Course Name", value: name, disabled: saving() }
                }
                SelectField {
                    label: "Department",
                    value: department,
                    options: department_options(&departments.data_or_default()),
                    placeholder: "Select a department",
                    disabled: saving(),
                }
                div { class: "grid",
                    NumberField { label: "Duration (years)", value: duration, min: 1, disabled: saving() }
                    TextField { label: "Colour", value: color, kind: "color", disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Save Changes" }
            }
        }
    }
}

#[component]
fn DeleteCourse(course: Course, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let mut deleting = use_signal(|| false);
    let id = course.id.clone();

    let delete = move |_| {
        let id = id.clone();
        deleting.set(true);
        spawn(async move {
            let deleted = state
                .mutate(Mutation::DeleteCourse, "Failed to delete course", |api| async move {
                    api.delete_course(&id).await
                })
                .await;
            deleting.set(false);
            if deleted.is_some() {
                state.success("Course deleted");
                on_close.call(());
            }
        });
    };

    rsx! {
        Modal { title: "Delete course?", on_close: move |_| on_close.call(()),
            p { "{course.code} {course.name} and its {course.units.len()} units will be removed." }
            footer {
                button { class: "secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { aria_busy: "{deleting}", disabled: deleting(), onclick: delete, "Delete" }
            }
        }
    }
}

#[component]
pub fn AdminCourseDetail(course_id: String) -> Element {
    let courses = use_courses();
    let users = use_users();
    let navigator = use_navigator();

    let course = courses
        .data()
        .and_then(|list| list.into_iter().find(|c| c.id == course_id));
    let Some(course) = course else {
        return match (courses.is_loading(), courses.error()) {
            (true, _) => rsx! { Spinner {} },
            (false, Some(message)) => rsx! { ErrorNotice { message } },
            (false, None) => rsx! {
                EmptyState {
                    title: "Course not found",
                    message: "It may have been deleted.",
                    action: rsx! {
                        button { onclick: move |_| { navigator.push(Route::AdminCourses {}); }, "Back to Courses" }
                    },
                }
            },
        };
    };
    let lecturer_list = lecturers(&users.data_or_default());
    let credits = course.credits.unwrap_or(0);

    rsx! {
        PageHeader {
            title: format!("{} - {}", course.code, course.name),
            subtitle: format!("Credits: {credits}"),
            actions: rsx! {
                button { class: "outline secondary", onclick: move |_| { navigator.push(Route::AdminCourses {}); }, "Back" }
            },
        }

        {rsx! { CourseRoom { key: "{course.id}", course: course.clone() } }}

        article {
            header { strong { "Units" } }
            if course.units.is_empty() {
                p { class: "muted", "No units yet" }
            }
            for unit in course.units.clone() {
                UnitRow {
                    key: "{unit.id}",
                    course_id: course.id.clone(),
                    unit: unit.clone(),
                    lecturers: lecturer_list.clone(),
                }
            }
        }

        AddUnitForm { course_id: course.id.clone() }
    }
}

#[component]
fn UnitRow(course_id: String, unit: Unit, lecturers: Vec<User>) -> Element {
    let state = use_app();
    let lecturer = use_signal(|| unit.lecturer.clone().unwrap_or_default());
    let mut saving = use_signal(|| false);

    let options: Vec<(String, String)> = lecturers
        .iter()
        .map(|l| (l.email.clone(), format!("{} ({})", l.display_name(), l.email)))
        .collect();

    let unit_id = unit.id.clone();
    let assign = move |_| {
        let email = match validate_lecturer_email(&lecturer()) {
            Ok(email) => email,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        let course_id = course_id.clone();
        let unit_id = unit_id.clone();
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::AssignUnitLecturer, "Assign failed", |api| {
                    let email = email.clone();
                    async move { api.assign_unit_lecturer(&course_id, &unit_id, &email).await }
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                state.success(format!("Assigned {email}"));
            }
        });
    };

    rsx! {
        div { class: "list-item",
            div { style: "display:flex;justify-content:space-between;gap:1rem;",
                div {
                    strong { "{unit.code} - {unit.name}" }
                    small { style: "display:block;",
                        if let (Some(year), Some(semester)) = (unit.year, unit.semester) {
                            "Year {year}, Semester {semester} · "
                        }
                        "Unit ID: {unit.id}"
                    }
                }
                if unit.has_lecturer() {
                    span { class: "badge success", "Assigned" }
                } else {
                    span { class: "badge warning", "Unassigned" }
                }
            }
            div { class: "grid",
                SelectField {
                    label: "Lecturer",
                    value: lecturer,
                    options,
                    placeholder: "Unassigned",
                    disabled: saving(),
                }
                button { aria_busy: "{saving}", disabled: saving(), onclick: assign, "Assign" }
            }
        }
    }
}

#[component]
fn AddUnitForm(course_id: String) -> Element {
    let state = use_app();
    let mut code = use_signal(String::new);
    let mut name = use_signal(String::new);
    let year = use_signal(|| NewUnit::default().year);
    let semester = use_signal(|| NewUnit::default().semester);
    let credits = use_signal(|| NewUnit::default().credits);
    let hours = use_signal(|| NewUnit::default().total_hours);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let unit = NewUnit {
            code: code().trim().to_string(),
            name: name().trim().to_string(),
            year: year(),
            semester: semester(),
            credits: credits(),
            total_hours: hours(),
        };
        if let Err(err) = validate_unit(&unit) {
            state.invalid(&err);
            return;
        }
        let course_id = course_id.clone();
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::AddUnit, "Add failed", |api| async move {
                    api.add_unit(&course_id, &unit).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                code.set(String::new());
                name.set(String::new());
                state.success("Unit added");
            }
        });
    };

    rsx! {
        article {
            header { strong { "Add Unit" } }
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Unit Code", value: code, placeholder: "CS101", disabled: saving() }
                    TextField { label: "Unit Name", value: name, disabled: saving() }
                }
                div { class: "grid",
                    NumberField { label: "Year", value: year, min: 1, disabled: saving() }
                    NumberField { label: "Semester", value: semester, min: 1, disabled: saving() }
                    NumberField { label: "Credits", value: credits, disabled: saving() }
                    NumberField { label: "Total Hours", value: hours, disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Add Unit" }
            }
        }
    }
}

/// Preselected option of the room picker.
fn initial_room(course: &Course) -> String {
    course.room_id.clone().unwrap_or_default()
}

/// Default room for every unit of the course.
#[component]
fn CourseRoom(course: Course) -> Element {
    let state = use_app();
    let rooms = use_rooms();
    let mut room = use_signal(|| initial_room(&course));
    let mut saving = use_signal(|| false);

    // Follow the course when the props change under a mounted picker
    use_effect(use_reactive(&course, move |course| room.set(initial_room(&course))));

    let course_id = course.id.clone();

    let save = move |_| {
        let Some(room_id) = optional(&room()) else {
            state.error("Missing Fields", "Please select a room");
            return;
        };
        let course_id = course_id.clone();
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::SetCourseRoom, "Failed to set room", |api| async move {
                    api.set_course_room(&course_id, &room_id).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                state.success("Room updated");
            }
        });
    };

    rsx! {
        article {
            header { strong { "Room" } }
            div { class: "grid",
                SelectField {
                    label: "Default room",
                    value: room,
                    options: room_options(&rooms.data_or_default()),
                    placeholder: "No room set",
                    disabled: saving(),
                }
                button { class: "secondary", aria_busy: "{saving}", disabled: saving(), onclick: save, "Set Room" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        serde_json::from_str(
            r##"{"id": "c1", "code": "BSC-CS", "name": "Computer Science",
                 "department_id": "d1", "duration_years": 4, "color": "#112233"}"##,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_room_follows_course() {
        let mut other = course();
        other.id = "c2".into();
        other.room_id = Some("r7".into());
        assert_eq!(initial_room(&course()), "");
        assert_eq!(initial_room(&other), "r7");
    }

    #[test]
    fn test_course_changes_only_sends_edits() {
        let edited = CourseUpdate {
            code: Some("BSC-CS".into()),
            name: Some("Computing".into()),
            department_id: Some("d1".into()),
            duration_years: Some(4),
            color: Some("#445566".into()),
        };
        let update = course_changes(&course(), &edited);
        assert_eq!(
            update,
            CourseUpdate {
                name: Some("Computing".into()),
                color: Some("#445566".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_course_changes_unchanged() {
        let edited = CourseUpdate {
            code: Some("BSC-CS".into()),
            name: Some("Computer Science".into()),
            department_id: Some("d1".into()),
            duration_years: Some(4),
            color: Some("#112233".into()),
        };
        assert_eq!(course_changes(&course(), &edited), CourseUpdate::default());
    }
}
