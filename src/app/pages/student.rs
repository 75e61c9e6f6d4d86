//! Student portal: dashboard, timetable, enrollment and clash alerts.

use dioxus::prelude::*;
use timetable_types::Course;

use crate::app::components::{
    EmptyState, ErrorNotice, PageHeader, Spinner, StatsCard, TimetableGrid,
};
use crate::app::hooks::{
    use_available_courses, use_student_departments, use_student_enrollments,
    use_student_timetable,
};
use crate::app::state::use_app;
use crate::app::Route;
use crate::query::Mutation;
use crate::schedule::summary::{format_enrolled_on, unique_courses, StudentSummary};
use crate::schedule::{detect_clashes, Clash};
use crate::validation::validate_enrollment;

#[component]
pub fn StudentDashboard() -> Element {
    let state = use_app();
    let enrollments = use_student_enrollments();
    let timetable = use_student_timetable();
    let navigator = use_navigator();

    if enrollments.is_loading() || timetable.is_loading() {
        return rsx! { Spinner {} };
    }

    let enrollments = enrollments.data_or_default();
    let timetable = timetable.data_or_default();
    let summary = StudentSummary::from_lists(&enrollments, &timetable);
    let name = state
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Student".to_string());
    let courses: Vec<_> = unique_courses(&enrollments).into_iter().cloned().collect();

    rsx! {
        PageHeader {
            title: format!("Welcome, {name}!"),
            subtitle: "Here's an overview of your academic schedule",
        }
        div { class: "stats-grid",
            StatsCard { title: "Enrolled Courses", value: summary.enrolled_courses.to_string() }
            StatsCard { title: "Total Units", value: summary.total_units.to_string() }
            StatsCard { title: "Classes This Week", value: summary.classes_this_week.to_string() }
            StatsCard {
                title: "Schedule Clashes",
                value: summary.clashes.to_string(),
                description: if summary.clashes > 0 { "Needs attention" } else { "All clear" },
            }
        }

        section {
            h3 { "My Enrolled Courses" }
            if courses.is_empty() {
                EmptyState {
                    title: "No courses yet",
                    message: "Browse the course list and enroll in the units you are taking.",
                    action: rsx! {
                        button { onclick: move |_| { navigator.push(Route::StudentCourses {}); }, "Browse Courses" }
                    },
                }
            } else {
                div { class: "card-grid",
                    for enrollment in courses {
                        article { key: "{enrollment.id}",
                            header {
                                strong { "{enrollment.course_code.clone().unwrap_or_default()}" }
                            }
                            p { "{enrollment.course_name.clone().unwrap_or_default()}" }
                            footer { style: "display:flex;justify-content:space-between;",
                                small { "{enrollment.unit_count()} units" }
                                small { "Enrolled on {format_enrolled_on(enrollment.created_at.as_deref())}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn StudentTimetable() -> Element {
    let timetable = use_student_timetable();

    let body = match (timetable.data(), timetable.error()) {
        (Some(entries), _) if entries.is_empty() => rsx! {
            EmptyState {
                title: "No classes scheduled",
                message: "Once you enroll in units and the timetable is generated, your classes appear here.",
            }
        },
        (Some(entries), _) => rsx! { TimetableGrid { entries } },
        (None, Some(message)) => rsx! { ErrorNotice { message } },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        PageHeader { title: "My Timetable", subtitle: "Your weekly class schedule" }
        {body}
    }
}

#[component]
pub fn StudentCourses() -> Element {
    let state = use_app();
    let courses = use_available_courses();
    let enrollments = use_student_enrollments();
    let departments = use_student_departments();
    let mut search = use_signal(String::new);
    let mut department = use_signal(String::new);
    let mut selected_course = use_signal(|| Option::<String>::None);
    let mut selected_units = use_signal(Vec::<String>::new);
    let mut enrolling = use_signal(|| false);

    if courses.is_loading() || enrollments.is_loading() {
        return rsx! { Spinner {} };
    }

    let courses = courses.data_or_default();
    let enrollments = enrollments.data_or_default();
    let enrolled_ids: Vec<String> = enrollments.iter().map(|e| e.course_id.clone()).collect();
    let enrolled_count = unique_courses(&enrollments).len();
    let query = search();
    let department_filter = department();
    let filtered: Vec<Course> = courses
        .iter()
        .filter(|c| c.matches(&query) && in_department(c, &department_filter))
        .cloned()
        .collect();
    let current = selected_course()
        .and_then(|id| courses.iter().find(|c| c.id == id).cloned());

    let enroll = move |_| {
        let course_id = selected_course();
        let unit_ids = selected_units();
        if let Err(err) = validate_enrollment(course_id.as_deref(), &unit_ids) {
            state.invalid(&err);
            return;
        }
        let Some(course_id) = course_id else {
            return;
        };
        enrolling.set(true);
        spawn(async move {
            let enrolled = state
                .mutate(Mutation::EnrollInCourse, "Failed to enroll in course", |api| async move {
                    api.enroll(&course_id, unit_ids).await
                })
                .await;
            if enrolled.is_some() {
                state.success("Successfully enrolled in course units");
                selected_units.set(Vec::new());
                selected_course.set(None);
            }
            enrolling.set(false);
        });
    };

    rsx! {
        PageHeader { title: "Course Enrollment", subtitle: "Select a course and the units you are taking" }

        article {
            header { style: "display:flex;justify-content:space-between;",
                strong { "My Courses" }
                span { class: "badge", "{enrolled_count} Courses" }
            }
            if enrolled_count == 0 {
                p { class: "muted", "You have not enrolled in any courses yet" }
            } else {
                ul {
                    for enrollment in unique_courses(&enrollments) {
                        li { key: "{enrollment.id}",
                            strong { "{enrollment.course_code.clone().or(enrollment.course_name.clone()).unwrap_or_else(|| \"Course\".to_string())}" }
                            " · {enrollment.unit_count()} units"
                            small { " · Enrolled on {format_enrolled_on(enrollment.created_at.as_deref())}" }
                        }
                    }
                }
            }
        }

        h3 { "Browse and Enroll in Courses" }
        input {
            r#type: "search",
            placeholder: "Search courses by code or name...",
            value: "{search}",
            oninput: move |evt| search.set(evt.value()),
        }
        if let Some(list) = departments.data().filter(|list| !list.is_empty()) {
            select {
                aria_label: "Department",
                onchange: move |evt| department.set(evt.value()),
                option { value: "", selected: department_filter.is_empty(), "All departments" }
                for d in list {
                    option { key: "{d.id}", value: "{d.id}", selected: d.id == department_filter, "{d.name}" }
                }
            }
        }
        small { "Showing {filtered.len()} of {courses.len()} courses" }

        if filtered.is_empty() {
            EmptyState {
                title: "Nothing here",
                message: if query.trim().is_empty() { "No courses available" } else { "No courses match your search" },
            }
        } else {
            div { class: "card-grid", style: "margin-top:1rem;",
                for course in filtered {
                    CourseOption {
                        key: "{course.id}",
                        selected: selected_course().as_deref() == Some(course.id.as_str()),
                        enrolled: enrolled_ids.contains(&course.id),
                        on_select: move |id: String| {
                            selected_course.set(Some(id));
                            selected_units.set(Vec::new());
                        },
                        course: course.clone(),
                    }
                }
            }
        }

        if let Some(course) = current {
            article { style: "margin-top:1.5rem;",
                header {
                    strong { "{course.code}" }
                    " {course.name}"
                    if enrolled_ids.contains(&course.id) {
                        " "
                        span { class: "badge success", "Enrolled" }
                    }
                }
                h5 { "Course Units" }
                if course.units.is_empty() {
                    p { class: "muted", "This course has no units yet." }
                } else {
                    fieldset {
                        for unit in course.units.clone() {
                            label { key: "{unit.id}",
                                input {
                                    r#type: "checkbox",
                                    checked: selected_units.read().contains(&unit.id),
                                    onchange: {
                                        let id = unit.id.clone();
                                        move |_| {
                                            let mut units = selected_units.write();
                                            if let Some(pos) = units.iter().position(|u| *u == id) {
                                                units.remove(pos);
                                            } else {
                                                units.push(id.clone());
                                            }
                                        }
                                    },
                                }
                                strong { "{unit.code}" }
                                " {unit.name}"
                                if let (Some(year), Some(semester)) = (unit.year, unit.semester) {
                                    small { " · Year {year}, Semester {semester}" }
                                }
                            }
                        }
                    }
                }
                footer {
                    button {
                        aria_busy: "{enrolling}",
                        disabled: enrolling(),
                        onclick: enroll,
                        "Enroll in {selected_units.read().len()} unit(s)"
                    }
                }
            }
        }
    }
}

/// An empty department id matches every course.
fn in_department(course: &Course, department_id: &str) -> bool {
    department_id.is_empty() || course.department_id.as_deref() == Some(department_id)
}

#[component]
fn CourseOption(course: Course, selected: bool, enrolled: bool, on_select: EventHandler<String>) -> Element {
    let style = if selected {
        "cursor:pointer;outline:2px solid var(--pico-primary);"
    } else {
        "cursor:pointer;"
    };
    let years = course.duration_years.unwrap_or(3);
    let id = course.id.clone();

    rsx! {
        article { style: "{style}", onclick: move |_| on_select.call(id.clone()),
            header { style: "display:flex;justify-content:space-between;",
                strong { "{course.code}" }
                if enrolled {
                    span { class: "badge success", "Enrolled" }
                }
            }
            p { "{course.name}" }
            small { "{course.units.len()} units · {years}-year program" }
        }
    }
}

#[component]
pub fn StudentClashes() -> Element {
    let timetable = use_student_timetable();

    let Some(entries) = timetable.data() else {
        return match timetable.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let clashes = detect_clashes(&entries);

    rsx! {
        PageHeader { title: "Clash Alerts", subtitle: "Schedule conflicts that need your attention" }
        if clashes.is_empty() {
            EmptyState {
                title: "No Clashes Detected",
                message: "Your schedule is clash-free. Great job!",
            }
        } else {
            div { class: "card-grid",
                for clash in clashes {
                    ClashCard { key: "{clash.id}", clash: clash.clone() }
                }
            }
        }
    }
}

#[component]
fn ClashCard(clash: Clash) -> Element {
    rsx! {
        article { style: "border-left:4px solid var(--pico-del-color);",
            header { style: "display:flex;justify-content:space-between;",
                div {
                    strong { "Schedule Conflict" }
                    small { style: "display:block;", "{clash.courses.len()} classes scheduled at same time" }
                }
                span { class: "badge danger", "Conflict" }
            }
            p { "{clash.day} · {clash.start_time} - {clash.end_time}" }
            h6 { "Courses" }
            ul {
                for course in clash.courses.iter() {
                    li { "{course}" }
                }
            }
            h6 { "Rooms" }
            p { "{clash.rooms.join(\", \")}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, department_id: Option<&str>) -> Course {
        Course {
            id: id.to_string(),
            code: id.to_uppercase(),
            name: format!("Course {id}"),
            department_id: department_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_department_filter() {
        let physics = course("c1", Some("d1"));
        let unassigned = course("c2", None);

        assert!(in_department(&physics, ""));
        assert!(in_department(&unassigned, ""));
        assert!(in_department(&physics, "d1"));
        assert!(!in_department(&physics, "d2"));
        assert!(!in_department(&unassigned, "d1"));
    }
}
