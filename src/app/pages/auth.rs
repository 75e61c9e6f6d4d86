//! Sign-in and registration pages.
//!
//! Each role has its own login and registration page; `/login` and
//! `/register` let the visitor pick the role first.

use dioxus::prelude::*;
use timetable_types::Role;

use crate::app::components::{push_path, TextField};
use crate::app::state::use_app;
use crate::app::Route;
use crate::auth::guard::post_login_target;
use crate::auth::session;
use crate::validation::{validate_role_login, NewStaff, StaffSignup, StudentSignup};

const ROLES: [Role; 3] = [Role::Student, Role::Lecturer, Role::Admin];

/// Element id the Google button renders into.
const GOOGLE_BUTTON_ID: &str = "google-signin-button";

fn login_route(role: Role, from: String) -> Route {
    match role {
        Role::Student => Route::StudentLogin { from },
        Role::Lecturer => Route::LecturerLogin { from },
        Role::Admin => Route::AdminLogin { from },
    }
}

fn register_route(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentRegister {},
        Role::Lecturer => Route::LecturerRegister {},
        Role::Admin => Route::AdminRegister {},
    }
}

/// Route `from` values arrive percent-encoded from the guard.
fn decode_from(from: &str) -> String {
    urlencoding::decode(from)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| from.to_string())
}

/// The portal a `from` path belongs to, used to preselect the role.
fn role_for_path(path: &str) -> Option<Role> {
    ROLES
        .into_iter()
        .find(|role| path.starts_with(crate::auth::guard::portal_prefix(*role)))
}

fn blurb(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Student => (
            "Welcome, Student!",
            "Check your timetable, enroll in units and catch schedule clashes early.",
        ),
        Role::Lecturer => (
            "Welcome, Educator!",
            "Manage your teaching schedule, courses and availability preferences.",
        ),
        Role::Admin => (
            "Administration",
            "Manage courses, rooms, users and generate clash-free timetables.",
        ),
    }
}

// ==================== Login ====================

/// `/login`: pick a role, then sign in.
#[component]
pub fn Login(from: String) -> Element {
    let from = decode_from(&from);
    let mut role = use_signal({
        let from = from.clone();
        move || role_for_path(&from).unwrap_or(Role::Student)
    });

    rsx! {
        document::Title { "Sign in - TimeTable" }
        article { style: "max-width:32rem;margin:2rem auto;",
            hgroup {
                h2 { "Sign in to TimeTable" }
                p { "Enter your credentials to continue" }
            }
            RolePicker { selected: role(), on_pick: move |r| role.set(r) }
            SignInForm { key: "{role()}", role: role(), from: from.clone() }
            p { class: "muted",
                "Don't have an account? "
                Link { to: register_route(role()), "Create one" }
            }
        }
    }
}

#[component]
fn RolePicker(selected: Role, on_pick: EventHandler<Role>) -> Element {
    rsx! {
        div { role: "group",
            for role in ROLES {
                button {
                    key: "{role}",
                    r#type: "button",
                    class: if role == selected { "" } else { "outline" },
                    onclick: move |_| on_pick.call(role),
                    "{role.label()}"
                }
            }
        }
    }
}

#[component]
pub fn StudentLogin(from: String) -> Element {
    rsx! { RoleLogin { role: Role::Student, from } }
}

#[component]
pub fn LecturerLogin(from: String) -> Element {
    rsx! { RoleLogin { role: Role::Lecturer, from } }
}

#[component]
pub fn AdminLogin(from: String) -> Element {
    rsx! { RoleLogin { role: Role::Admin, from } }
}

#[component]
fn RoleLogin(role: Role, from: String) -> Element {
    let state = use_app();
    let from = decode_from(&from);
    let (heading, text) = blurb(role);
    let google = role != Role::Student && state.config.read().google_sign_in_enabled();

    rsx! {
        document::Title { "{role.label()} Login - TimeTable" }
        div { class: "grid", style: "margin-top:2rem;",
            article {
                h2 { "{heading}" }
                p { "{text}" }
            }
            article {
                hgroup {
                    h3 { "{role.label()} Login" }
                    p { "Sign in to your account" }
                }
                SignInForm { role, from: from.clone() }
                if google {
                    p { class: "muted", style: "text-align:center;", "or" }
                    GoogleSignIn { role, from: from.clone() }
                }
                p { class: "muted",
                    "New here? "
                    Link { to: register_route(role), "Create an account" }
                }
            }
        }
    }
}

/// Email and password form for one role.
#[component]
fn SignInForm(role: Role, from: String) -> Element {
    let state = use_app();
    let navigator = use_navigator();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if let Err(err) = validate_role_login(role, &email(), &password()) {
            state.invalid(&err);
            return;
        }
        loading.set(true);
        let from = from.clone();
        spawn(async move {
            match session::login(&state.api(), &email(), &password(), role).await {
                Ok(user) => {
                    let target = post_login_target(user.role, Some(from.as_str()));
                    state.signed_in(user);
                    state.info("Signed in", "Welcome back!");
                    push_path(navigator, &target);
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    state.error(
                        "Login Failed",
                        e.server_message().unwrap_or("Invalid credentials"),
                    );
                }
            }
            loading.set(false);
        });
    };

    let placeholder = match role {
        Role::Student => "name@students.university.ac.ke",
        _ => "you@university.ac.ke",
    };

    rsx! {
        form { onsubmit,
            TextField { label: "Email", value: email, kind: "email", placeholder, disabled: loading(), required: true }
            TextField { label: "Password", value: password, kind: "password", placeholder: "••••••••", disabled: loading(), required: true }
            button { r#type: "submit", aria_busy: "{loading}", disabled: loading(),
                if loading() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

/// Google Identity Services button for lecturer and admin sign-in.
///
/// The GIS script posts each credential back through the eval channel;
/// the backend exchanges it for a session.
#[component]
fn GoogleSignIn(role: Role, from: String) -> Element {
    let state = use_app();
    let navigator = use_navigator();

    use_effect(move || {
        let Some(client_id) = state.config.peek().google_client_id.clone() else {
            return;
        };
        let from = from.clone();
        spawn(async move {
            let mut eval = document::eval(&google_script(&client_id));
            while let Ok(credential) = eval.recv::<String>().await {
                match session::google_sign_in(&state.api(), &credential, role).await {
                    Ok(user) => {
                        let target = post_login_target(user.role, Some(from.as_str()));
                        state.success(format!("Welcome, {}!", user.display_name()));
                        state.signed_in(user);
                        push_path(navigator, &target);
                    }
                    Err(e) => {
                        tracing::warn!("Google sign-in failed: {}", e);
                        state.error(
                            "Sign-In Failed",
                            e.server_message().unwrap_or("Failed to sign in with Google"),
                        );
                    }
                }
            }
        });
    });

    rsx! {
        div { id: GOOGLE_BUTTON_ID, style: "display:flex;justify-content:center;" }
    }
}

/// Load the GIS client, render its button and forward credentials.
fn google_script(client_id: &str) -> String {
    let client_id = serde_json::Value::String(client_id.to_string());
    format!(
        r#"
        await new Promise((resolve, reject) => {{
            if (window.google && window.google.accounts) {{ resolve(); return; }}
            const script = document.createElement('script');
            script.src = 'https://accounts.google.com/gsi/client';
            script.async = true;
            script.onload = resolve;
            script.onerror = reject;
            document.head.appendChild(script);
        }});
        google.accounts.id.initialize({{
            client_id: {client_id},
            callback: (response) => dioxus.send(response.credential),
        }});
        google.accounts.id.renderButton(
            document.getElementById('{GOOGLE_BUTTON_ID}'),
            {{ theme: 'outline', size: 'large', text: 'signin_with' }}
        );
        await new Promise(() => {{}});
        "#
    )
}

// ==================== Registration ====================

/// `/register`: pick a role to register as.
#[component]
pub fn Register() -> Element {
    let navigator = use_navigator();

    rsx! {
        document::Title { "Register - TimeTable" }
        article { style: "max-width:40rem;margin:2rem auto;",
            hgroup {
                h2 { "Create Your Account" }
                p { "Join your institution and manage timetables easily." }
            }
            div { class: "grid",
                for role in ROLES {
                    article { key: "{role}",
                        h4 { "{role.label()}" }
                        p { class: "muted", "{blurb(role).1}" }
                        button {
                            r#type: "button",
                            onclick: move |_| {
                                navigator.push(register_route(role));
                            },
                            "Register as {role.label()}"
                        }
                    }
                }
            }
            p { class: "muted",
                "Already registered? "
                Link { to: Route::Login { from: String::new() }, "Sign in" }
            }
        }
    }
}

#[component]
pub fn StudentRegister() -> Element {
    let state = use_app();
    let navigator = use_navigator();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let registration_number = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = StudentSignup {
            email: email(),
            name: name(),
            registration_number: registration_number(),
            password: password(),
            confirm_password: confirm_password(),
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        loading.set(true);
        spawn(async move {
            match state.api().register_student(&request).await {
                Ok(_) => {
                    tracing::info!(email = %request.email, "Student registered");
                    state.success("Registration successful! Please sign in.");
                    navigator.push(Route::StudentLogin { from: String::new() });
                }
                Err(e) => state.error(
                    "Registration Failed",
                    e.server_message().unwrap_or("Please try again"),
                ),
            }
            loading.set(false);
        });
    };

    rsx! {
        RegisterShell { role: Role::Student,
            form { onsubmit,
                TextField { label: "Full Name", value: name, disabled: loading(), required: true }
                TextField { label: "Student Email", value: email, kind: "email", placeholder: "name@students.university.ac.ke", disabled: loading(), required: true }
                TextField { label: "Registration Number", value: registration_number, placeholder: "ABC001-2345/2024", disabled: loading(), required: true }
                div { class: "grid",
                    TextField { label: "Password", value: password, kind: "password", disabled: loading(), required: true }
                    TextField { label: "Confirm Password", value: confirm_password, kind: "password", disabled: loading(), required: true }
                }
                button { r#type: "submit", aria_busy: "{loading}", disabled: loading(), "Create Account" }
            }
        }
    }
}

#[component]
pub fn LecturerRegister() -> Element {
    rsx! { StaffRegister { role: Role::Lecturer } }
}

#[component]
pub fn AdminRegister() -> Element {
    rsx! { StaffRegister { role: Role::Admin } }
}

#[component]
fn StaffRegister(role: Role) -> Element {
    let state = use_app();
    let navigator = use_navigator();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let identifier = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = StaffSignup {
            role,
            email: email(),
            name: name(),
            identifier: identifier(),
            password: password(),
            confirm_password: confirm_password(),
        };
        let request = match form.validate_registration() {
            Ok(request) => request,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        loading.set(true);
        spawn(async move {
            let api = state.api();
            let result = match &request {
                NewStaff::Lecturer(req) => api.register_lecturer(req).await,
                NewStaff::Admin(req) => api.register_admin(req).await,
            };
            match result {
                Ok(_) => {
                    tracing::info!(role = %role, "Staff account registered");
                    state.success("Registration successful! Please sign in.");
                    navigator.push(login_route(role, String::new()));
                }
                Err(e) => state.error(
                    "Registration Failed",
                    e.server_message().unwrap_or("Please try again"),
                ),
            }
            loading.set(false);
        });
    };

    let id_label = match role {
        Role::Admin => "Admin ID",
        _ => "Lecturer ID",
    };

    rsx! {
        RegisterShell { role,
            form { onsubmit,
                TextField { label: "Full Name", value: name, disabled: loading(), required: true }
                TextField { label: "Email", value: email, kind: "email", placeholder: "you@university.ac.ke", disabled: loading(), required: true }
                TextField { label: id_label, value: identifier, disabled: loading(), required: true }
                div { class: "grid",
                    TextField { label: "Password", value: password, kind: "password", disabled: loading(), required: true }
                    TextField { label: "Confirm Password", value: confirm_password, kind: "password", disabled: loading(), required: true }
                }
                button { r#type: "submit", aria_busy: "{loading}", disabled: loading(), "Create Account" }
            }
        }
    }
}

#[component]
fn RegisterShell(role: Role, children: Element) -> Element {
    rsx! {
        document::Title { "{role.label()} Registration - TimeTable" }
        article { style: "max-width:36rem;margin:2rem auto;",
            hgroup {
                h2 { "{role.label()} Registration" }
                p { "Set up your account to get started" }
            }
            {children}
            p { class: "muted",
                "Already have an account? "
                Link { to: login_route(role, String::new()), "Sign in" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_from() {
        assert_eq!(decode_from("%2Fadmin%2Frooms"), "/admin/rooms");
        assert_eq!(decode_from("/admin/rooms"), "/admin/rooms");
    }

    #[test]
    fn test_role_for_path() {
        assert_eq!(role_for_path("/lecturer/availability"), Some(Role::Lecturer));
        assert_eq!(role_for_path("/admin/course/1"), Some(Role::Admin));
        assert_eq!(role_for_path("/login"), None);
    }

    #[test]
    fn test_google_script_quotes_client_id() {
        let script = google_script("abc\"def.apps.googleusercontent.com");
        assert!(script.contains(r#"client_id: "abc\"def.apps.googleusercontent.com""#));
        assert!(script.contains(GOOGLE_BUTTON_ID));
    }
}
