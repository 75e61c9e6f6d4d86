//! Portal sidebar: role menu, collapse toggle, profile links and logout.

use dioxus::prelude::*;
use timetable_types::Role;

use crate::app::state::use_app;
use crate::app::Route;

#[derive(Clone, PartialEq)]
struct MenuItem {
    label: &'static str,
    glyph: &'static str,
    route: Route,
}

impl MenuItem {
    fn new(label: &'static str, glyph: &'static str, route: Route) -> Self {
        Self { label, glyph, route }
    }
}

fn menu(role: Role) -> Vec<MenuItem> {
    match role {
        Role::Student => vec![
            MenuItem::new("Dashboard", "⌂", Route::StudentDashboard {}),
            MenuItem::new("My Timetable", "▦", Route::StudentTimetable {}),
            MenuItem::new("My Courses", "☰", Route::StudentCourses {}),
            MenuItem::new("Clash Alerts", "⚠", Route::StudentClashes {}),
        ],
        Role::Lecturer => vec![
            MenuItem::new("Dashboard", "⌂", Route::LecturerDashboard {}),
            MenuItem::new("Teaching Schedule", "▦", Route::LecturerSchedule {}),
            MenuItem::new("My Courses", "☰", Route::LecturerCourses {}),
            MenuItem::new("Availability", "◷", Route::LecturerAvailability {}),
        ],
        Role::Admin => vec![
            MenuItem::new("Dashboard", "⌂", Route::AdminDashboard {}),
            MenuItem::new("Timetable", "▦", Route::AdminTimetable {}),
            MenuItem::new("Courses", "☰", Route::AdminCourses {}),
            MenuItem::new("Departments", "⌸", Route::AdminDepartments {}),
            MenuItem::new("Rooms", "▢", Route::AdminRooms {}),
            MenuItem::new("Users", "☺", Route::AdminUsers {}),
            MenuItem::new("Settings", "⚙", Route::AdminSettings {}),
        ],
    }
}

fn portal_label(role: Role) -> &'static str {
    match role {
        Role::Student => "Student Portal",
        Role::Lecturer => "Lecturer Portal",
        Role::Admin => "Admin Panel",
    }
}

fn account_route(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentAccount {},
        Role::Lecturer => Route::LecturerAccount {},
        Role::Admin => Route::AdminAccount {},
    }
}

#[component]
pub fn Sidebar() -> Element {
    let state = use_app();
    let current = use_route::<Route>();
    let navigator = use_navigator();
    let mut collapsed = use_signal(|| false);

    // RequireAuth only renders the portal once a user is known
    let Some(user) = state.user() else {
        return rsx! {};
    };

    let logout = move |_| {
        state.sign_out();
        state.info("Signed out", "You have been signed out.");
        navigator.push(Route::Index {});
    };

    let class = if collapsed() { "sidebar collapsed" } else { "sidebar" };
    let items = menu(user.role);

    rsx! {
        aside { class: "{class}",
            div { class: "brand",
                if !collapsed() {
                    div {
                        strong { "TimeTable" }
                        small { "{portal_label(user.role)}" }
                    }
                }
                button {
                    class: "outline secondary",
                    r#type: "button",
                    title: if collapsed() { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| collapsed.toggle(),
                    if collapsed() { "»" } else { "«" }
                }
            }

            nav {
                ul {
                    for item in items {
                        li { key: "{item.label}",
                            Link {
                                to: item.route.clone(),
                                class: if item.route == current { "active" } else { "" },
                                span { "{item.glyph}" }
                                if !collapsed() {
                                    span { "{item.label}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "profile",
                div { style: "display:flex;gap:0.5rem;align-items:center;",
                    span { class: "avatar", "{user.initial()}" }
                    if !collapsed() {
                        div {
                            strong { "{user.display_name()}" }
                            small { style: "display:block;", "{user.role.label()}" }
                        }
                    }
                }
                if !collapsed() {
                    Link { to: account_route(user.role), "Account Settings" }
                    if user.role == Role::Admin {
                        Link { to: Route::AdminSettings {}, "Admin Settings" }
                    }
                }
                button {
                    class: "outline contrast",
                    r#type: "button",
                    onclick: logout,
                    if collapsed() { "⏻" } else { "Log out" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_stay_inside_portal() {
        for role in [Role::Student, Role::Lecturer, Role::Admin] {
            let prefix = crate::auth::guard::portal_prefix(role);
            for item in menu(role) {
                assert!(item.route.to_string().starts_with(prefix), "{}", item.label);
            }
            assert!(account_route(role).to_string().starts_with(prefix));
        }
    }

    #[test]
    fn test_admin_menu() {
        let labels: Vec<_> = menu(Role::Admin).iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            ["Dashboard", "Timetable", "Courses", "Departments", "Rooms", "Users", "Settings"]
        );
    }
}
