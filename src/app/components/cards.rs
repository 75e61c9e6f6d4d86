//! Small presentational pieces shared by the portals.

use dioxus::prelude::*;
use timetable_types::{Course, Department, User};

#[component]
pub fn Spinner() -> Element {
    rsx! {
        p { aria_busy: "true", "Loading..." }
    }
}

/// Inline error returned by a failed query.
#[component]
pub fn ErrorNotice(#[props(into)] message: String) -> Element {
    rsx! {
        article { class: "centered",
            strong { "Something went wrong" }
            p { small { "{message}" } }
        }
    }
}

/// Centered placeholder for empty lists.
#[component]
pub fn EmptyState(
    #[props(into)] title: String,
    #[props(into)] message: String,
    action: Option<Element>,
) -> Element {
    rsx! {
        article { class: "centered",
            h3 { "{title}" }
            p { class: "muted", "{message}" }
            if let Some(action) = action {
                {action}
            }
        }
    }
}

/// A single statistic tile.
#[component]
pub fn StatsCard(
    #[props(into)] title: String,
    #[props(into)] value: String,
    #[props(into, default)] description: String,
) -> Element {
    rsx! {
        article {
            small { "{title}" }
            p { class: "stat-value", "{value}" }
            if !description.is_empty() {
                small { "{description}" }
            }
        }
    }
}

/// Course summary card with lecturer, student and unit counts.
///
/// `lecturers` and `departments` are the lists used to resolve names.
#[component]
pub fn CourseCard(
    course: Course,
    #[props(default)] lecturers: Vec<User>,
    #[props(default)] departments: Vec<Department>,
    footer: Option<Element>,
) -> Element {
    let color = course.color_or_default().to_string();
    let lecturer = course
        .units
        .iter()
        .filter_map(|u| u.lecturer.as_deref())
        .find_map(|email| lecturers.iter().find(|l| l.email == email));
    let department = course
        .department_id
        .as_deref()
        .and_then(|id| departments.iter().find(|d| d.id == id))
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "-".to_string());
    let credits = course.credits.unwrap_or(0);

    rsx! {
        article { class: "course-card", style: "--course-color: {color};",
            header { style: "display:flex;justify-content:space-between;",
                span { class: "badge", style: "background:{color};color:#fff;", "{course.code}" }
                small { "{credits} credits" }
            }
            h4 { "{course.name}" }
            if let Some(lecturer) = lecturer {
                p {
                    span { class: "avatar", "{lecturer.initial()}" }
                    " {lecturer.display_name()}"
                }
            }
            footer { style: "display:flex;gap:1rem;",
                small { "{course.student_count} students" }
                small { "{course.units.len()} units" }
                small { style: "margin-left:auto;", "{department}" }
            }
            if let Some(footer) = footer {
                {footer}
            }
        }
    }
}

/// Pico modal dialog. Closing is left to the parent via `on_close`.
#[component]
pub fn Modal(#[props(into)] title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        dialog { open: true,
            article {
                header {
                    button {
                        r#type: "button",
                        "rel": "prev",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                    }
                    strong { "{title}" }
                }
                {children}
            }
        }
    }
}

/// Status badge for class assignments.
#[component]
pub fn StatusBadge(confirmed: bool) -> Element {
    rsx! {
        if confirmed {
            span { class: "badge success", "Confirmed" }
        } else {
            span { class: "badge warning", "Pending" }
        }
    }
}
