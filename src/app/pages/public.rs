//! Landing, forbidden and not-found pages.

use dioxus::prelude::*;
use timetable_types::Role;

use crate::app::components::push_path;
use crate::app::state::use_app;
use crate::app::Route;
use crate::auth::dashboard_path;

struct RoleTile {
    title: &'static str,
    description: &'static str,
    action: &'static str,
    route: Route,
}

fn role_tiles() -> [RoleTile; 3] {
    [
        RoleTile {
            title: "Student",
            description: "View your personalized timetable, enroll in units and get alerted to schedule clashes.",
            action: "Student Login",
            route: Route::StudentLogin { from: String::new() },
        },
        RoleTile {
            title: "Lecturer",
            description: "See your teaching schedule and pick the time slots that work for your units.",
            action: "Lecturer Login",
            route: Route::LecturerLogin { from: String::new() },
        },
        RoleTile {
            title: "Administrator",
            description: "Manage courses, rooms and users, and generate clash-free timetables.",
            action: "Admin Login",
            route: Route::AdminLogin { from: String::new() },
        },
    ]
}

#[component]
pub fn Index() -> Element {
    let navigator = use_navigator();

    rsx! {
        document::Title { "TimeTable - Campus Schedules Management" }
        section { class: "centered",
            p { span { class: "badge", "Automatic Clash-Free Timetable Generation" } }
            h1 { "Campus Schedules Management System" }
            p { class: "muted",
                "Clash-free timetables for students, lecturers and administrators."
            }
            div { class: "actions", style: "justify-content:center;",
                button {
                    onclick: move |_| {
                        navigator.push(Route::StudentLogin { from: String::new() });
                    },
                    "Get Started"
                }
                a { href: "#features", role: "button", class: "outline", "Learn More" }
            }
        }

        section {
            hgroup { style: "text-align:center;",
                h2 { "Choose Your Role" }
                p { "Access your dashboard with features tailored to your needs" }
            }
            div { class: "grid",
                for tile in role_tiles() {
                    article { key: "{tile.title}",
                        h3 { "{tile.title}" }
                        p { "{tile.description}" }
                        Link { to: tile.route, "{tile.action} →" }
                    }
                }
            }
        }

        section { id: "features",
            h2 { "Features" }
            div { class: "grid",
                article {
                    h4 { "Weekly Grid" }
                    p { "Every class on a Monday to Friday grid, colour-coded by course." }
                }
                article {
                    h4 { "Clash Alerts" }
                    p { "Students see classes that start at the same time before they become a problem." }
                }
                article {
                    h4 { "Slot Selection" }
                    p { "Lecturers choose two or three hour slots from what is still free." }
                }
            }
        }
    }
}

/// 403. Shown after a role mismatch or a forbidden API response.
#[component]
pub fn Forbidden(from: String) -> Element {
    let state = use_app();
    let navigator = use_navigator();
    let role: Option<Role> = state.session.read().role();

    // Arriving here settles the pending 403
    use_effect(move || {
        let mut denied = state.denied;
        denied.set(false);
    });

    if !from.is_empty() {
        tracing::debug!("Forbidden: {}", from);
    }

    rsx! {
        document::Title { "Forbidden - TimeTable" }
        article { class: "centered", style: "max-width:32rem;margin:4rem auto;",
            h1 { "403" }
            p { "You do not have permission to view this page." }
            div { class: "actions", style: "justify-content:center;",
                button { onclick: move |_| navigator.go_back(), "Go back" }
                if let Some(role) = role {
                    button {
                        class: "outline",
                        onclick: move |_| push_path(navigator, dashboard_path(role)),
                        "My dashboard"
                    }
                } else {
                    button {
                        class: "outline",
                        onclick: move |_| {
                            navigator.push(Route::Index {});
                        },
                        "Home"
                    }
                }
            }
        }
    }
}

/// 404 for any path without a route.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    use_hook({
        let path = path.clone();
        move || tracing::warn!("No route for {}", path)
    });

    rsx! {
        document::Title { "Not Found - TimeTable" }
        main { class: "container",
            article { class: "centered", style: "max-width:32rem;margin:4rem auto;",
                h1 { "404" }
                p { "The page you are looking for does not exist or has been moved." }
                p { code { "{path}" } }
                Link { to: Route::Index {}, "Back to home" }
            }
        }
    }
}
