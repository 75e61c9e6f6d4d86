//! Dioxus fullstack application entry point.
//!
//! This module provides the root [`App`] component, the [`Route`] table and
//! the three portal layouts. Every portal route sits behind
//! [`RequireAuth`](components::RequireAuth) with the role it admits.

use dioxus::prelude::*;
use timetable_types::Role;

pub mod components;
pub mod hooks;
pub mod pages;
pub mod state;

use components::layout::{CUSTOM_STYLES, PICO_CSS};
use components::{DashboardLayout, PublicLayout, RequireAuth, Toaster};
use pages::{
    AdminAccount, AdminCourseDetail, AdminCourses, AdminDashboard, AdminDepartments, AdminLogin,
    AdminRegister, AdminRooms, AdminSettings, AdminTimetable, AdminUsers, Forbidden, Index,
    LecturerAccount, LecturerAvailability, LecturerCourses, LecturerDashboard, LecturerLogin,
    LecturerRegister, LecturerSchedule, Login, NotFound, Register, StudentAccount, StudentClashes,
    StudentCourses, StudentDashboard, StudentLogin, StudentRegister, StudentTimetable,
};
use state::AppState;

use crate::auth::guard::public_auth_redirect;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    use_context_provider(AppState::new);

    rsx! {
        document::Title { "TimeTable" }
        document::Link { rel: "stylesheet", href: PICO_CSS }
        document::Style { {CUSTOM_STYLES} }

        Router::<Route> {}
        Toaster {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Root)]
        #[layout(PublicLayout)]
            #[route("/")]
            Index {},
            #[route("/login?:from")]
            Login { from: String },
            #[route("/register")]
            Register {},
            #[route("/student/login?:from")]
            StudentLogin { from: String },
            #[route("/student/register")]
            StudentRegister {},
            #[route("/lecturer/login?:from")]
            LecturerLogin { from: String },
            #[route("/lecturer/register")]
            LecturerRegister {},
            #[route("/admin/login?:from")]
            AdminLogin { from: String },
            #[route("/admin/register")]
            AdminRegister {},
            #[route("/forbidden?:from")]
            Forbidden { from: String },
        #[end_layout]

        #[nest("/student")]
            #[layout(StudentPortal)]
                #[route("/dashboard")]
                StudentDashboard {},
                #[route("/timetable")]
                StudentTimetable {},
                #[route("/courses")]
                StudentCourses {},
                #[route("/clashes")]
                StudentClashes {},
                #[route("/account")]
                StudentAccount {},
            #[end_layout]
        #[end_nest]

        #[nest("/lecturer")]
            #[layout(LecturerPortal)]
                #[route("/dashboard")]
                LecturerDashboard {},
                #[route("/schedule")]
                LecturerSchedule {},
                #[route("/courses")]
                LecturerCourses {},
                #[route("/availability")]
                LecturerAvailability {},
                #[route("/account")]
                LecturerAccount {},
            #[end_layout]
        #[end_nest]

        #[nest("/admin")]
            #[layout(AdminPortal)]
                #[route("/dashboard")]
                AdminDashboard {},
                #[route("/timetable")]
                AdminTimetable {},
                #[route("/courses")]
                AdminCourses {},
                #[route("/course/:course_id")]
                AdminCourseDetail { course_id: String },
                #[route("/departments")]
                AdminDepartments {},
                #[route("/rooms")]
                AdminRooms {},
                #[route("/users")]
                AdminUsers {},
                #[route("/settings")]
                AdminSettings {},
                #[route("/account")]
                AdminAccount {},
            #[end_layout]
        #[end_nest]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

/// Outermost layout. Restores the session once, in the browser, and moves
/// a returning user off the public sign-in pages.
#[component]
fn Root() -> Element {
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let initial_path = use_route::<Route>().to_string();

    // Effects only run client-side, where the token lives
    use_effect(move || {
        let path = initial_path.clone();
        spawn(async move {
            state.restore_session().await;
            if let Some(target) = public_auth_redirect(&path, state.user().as_ref()) {
                tracing::info!("Session restored, continuing to {}", target);
                if let Ok(route) = target.parse::<Route>() {
                    navigator.replace(route);
                }
            }
        });
    });

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn StudentPortal() -> Element {
    rsx! {
        RequireAuth { roles: vec![Role::Student],
            DashboardLayout { Outlet::<Route> {} }
        }
    }
}

#[component]
fn LecturerPortal() -> Element {
    rsx! {
        RequireAuth { roles: vec![Role::Lecturer],
            DashboardLayout { Outlet::<Route> {} }
        }
    }
}

#[component]
fn AdminPortal() -> Element {
    rsx! {
        RequireAuth { roles: vec![Role::Admin],
            DashboardLayout { Outlet::<Route> {} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::guard::{account_path, dashboard_path, login_path, register_path};

    #[test]
    fn test_role_paths_are_routes() {
        for role in [Role::Student, Role::Lecturer, Role::Admin] {
            for path in [
                dashboard_path(role).to_string(),
                login_path(role).to_string(),
                register_path(role).to_string(),
                account_path(role),
            ] {
                let route: Route = path.parse().unwrap();
                assert!(!matches!(route, Route::NotFound { .. }), "{path}");
            }
        }
    }

    #[test]
    fn test_query_routes() {
        let route: Route = "/login?from=/admin/rooms".parse().unwrap();
        assert_eq!(
            route,
            Route::Login {
                from: "/admin/rooms".to_string()
            }
        );
        let route: Route = "/admin/course/c42".parse().unwrap();
        assert_eq!(
            route,
            Route::AdminCourseDetail {
                course_id: "c42".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_path() {
        let route: Route = "/nowhere/at/all".parse().unwrap();
        assert!(matches!(route, Route::NotFound { .. }));
    }
}
