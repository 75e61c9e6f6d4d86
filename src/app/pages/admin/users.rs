use dioxus::prelude::*;
use timetable_types::{Role, User};

use crate::app::components::{EmptyState, ErrorNotice, Modal, PageHeader, Spinner, TextField};
use crate::app::hooks::use_users;
use crate::app::state::use_app;
use crate::query::Mutation;
use crate::validation::{NewStaff, StaffSignup};

/// Users matching the role filter (all roles when `None`) and the search text.
fn filter_users(users: &[User], role: Option<Role>, query: &str) -> Vec<User> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| role.is_none_or(|r| u.role == r))
        .filter(|u| {
            query.is_empty()
                || u.email.to_lowercase().contains(&query)
                || u.name.to_lowercase().contains(&query)
                || u.role_identifier().is_some_and(|id| id.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Create(Role),
    Delete(User),
}

#[component]
pub fn AdminUsers() -> Element {
    let state = use_app();
    let users = use_users();
    let mut role = use_signal(|| Option::<Role>::None);
    let mut search = use_signal(String::new);
    let mut dialog = use_signal(|| Option::<Dialog>::None);

    let Some(all) = users.data() else {
        return match users.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let shown = filter_users(&all, role(), &search());
    let me = state.user().map(|u| u.email);
    let count = |r: Role| all.iter().filter(|u| u.role == r).count();
    let tabs = [
        (None, format!("All ({})", all.len())),
        (Some(Role::Student), format!("Students ({})", count(Role::Student))),
        (Some(Role::Lecturer), format!("Lecturers ({})", count(Role::Lecturer))),
        (Some(Role::Admin), format!("Admins ({})", count(Role::Admin))),
    ];

    rsx! {
        PageHeader {
            title: "User Management",
            subtitle: "Students, lecturers and administrators",
            actions: rsx! {
                button { onclick: move |_| dialog.set(Some(Dialog::Create(Role::Lecturer))), "Add Lecturer" }
                button { class: "secondary", onclick: move |_| dialog.set(Some(Dialog::Create(Role::Admin))), "Add Admin" }
            },
        }

        div { class: "actions", role: "group",
            for (value, label) in tabs {
                button {
                    key: "{label}",
                    class: if role() == value { "" } else { "outline" },
                    onclick: move |_| role.set(value),
                    "{label}"
                }
            }
        }
        input {
            r#type: "search",
            placeholder: "Search by name, email or ID...",
            value: "{search}",
            oninput: move |evt| search.set(evt.value()),
        }

        if shown.is_empty() {
            EmptyState { title: "No users", message: "No users match the current filter" }
        } else {
            div { class: "overflow-auto",
                table {
                    thead {
                        tr {
                            th { "Name" }
                            th { "Email" }
                            th { "Role" }
                            th { "ID" }
                            th {}
                        }
                    }
                    tbody {
                        for user in shown {
                            tr { key: "{user.id}",
                                td {
                                    span { class: "avatar", "{user.initial()}" }
                                    " {user.display_name()}"
                                }
                                td { "{user.email}" }
                                td { span { class: "badge", "{user.role.label()}" } }
                                td { "{user.role_identifier().unwrap_or(\"-\")}" }
                                td {
                                    if me.as_deref() != Some(user.email.as_str()) {
                                        button {
                                            class: "outline contrast",
                                            onclick: {
                                                let user = user.clone();
                                                move |_| dialog.set(Some(Dialog::Delete(user.clone())))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        {match dialog() {
            Some(Dialog::Create(role)) => rsx! {
                CreateStaff { key: "{role}", role, on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Delete(user)) => rsx! {
                DeleteUser { user: user.clone(), on_close: move |_| dialog.set(None) }
            },
            None => rsx! {},
        }}
    }
}

/// Lecturer or admin account created by an administrator.
#[component]
fn CreateStaff(role: Role, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let email = use_signal(String::new);
    let name = use_signal(String::new);
    let identifier = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let signup = StaffSignup {
            role,
            email: email(),
            name: name(),
            identifier: identifier(),
            password: password(),
            confirm_password: confirm(),
        };
        let staff = match signup.validate_creation() {
            Ok(staff) => staff,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        saving.set(true);
        spawn(async move {
            let created = state
                .mutate(Mutation::CreateUser, "Failed to create user", |api| async move {
                    match &staff {
                        NewStaff::Lecturer(req) => api.create_lecturer(req).await,
                        NewStaff::Admin(req) => api.create_admin(req).await,
                    }
                })
                .await;
            saving.set(false);
            if created.is_some() {
                tracing::info!("Created {} account", role.as_str());
                state.success(format!("{} created successfully", role.label()));
                on_close.call(());
            }
        });
    };

    let identifier_label = if role == Role::Admin { "Admin ID" } else { "Lecturer ID" };

    rsx! {
        Modal { title: format!("Add {}", role.label()), on_close: move |_| on_close.call(()),
            form { onsubmit,
                TextField { label: "Full Name", value: name, disabled: saving() }
                div { class: "grid",
                    TextField { label: "Email", value: email, kind: "email", disabled: saving() }
                    TextField { label: identifier_label, value: identifier, disabled: saving() }
                }
                div { class: "grid",
                    TextField { label: "Password", value: password, kind: "password", disabled: saving() }
                    TextField { label: "Confirm Password", value: confirm, kind: "password", disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Create" }
            }
        }
    }
}

#[component]
fn DeleteUser(user: User, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let mut deleting = use_signal(|| false);
    let id = user.id.clone();

    let delete = move |_| {
        let id = id.clone();
        deleting.set(true);
        spawn(async move {
            let deleted = state
                .mutate(Mutation::DeleteUser, "Failed to delete user", |api| async move {
                    api.delete_user(&id).await
                })
                .await;
            deleting.set(false);
            if deleted.is_some() {
                state.success("User deleted successfully");
                on_close.call(());
            }
        });
    };

    rsx! {
        Modal { title: "Delete user?", on_close: move |_| on_close.call(()),
            p { "{user.display_name()} ({user.email}) will lose access immediately." }
            footer {
                button { class: "secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { aria_busy: "{deleting}", disabled: deleting(), onclick: delete, "Delete" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        let mut student = User::from_claims("amy@students.uni.ac.ke", Role::Student);
        student.name = "Amy Otieno".into();
        student.registration_number = Some("ABC001-2345/2024".into());
        let mut lecturer = User::from_claims("kim@uni.ac.ke", Role::Lecturer);
        lecturer.lecturer_id = Some("LEC-7".into());
        vec![student, lecturer, User::from_claims("root@uni.ac.ke", Role::Admin)]
    }

    #[test]
    fn test_filter_by_role() {
        let all = users();
        let lecturers = filter_users(&all, Some(Role::Lecturer), "");
        assert_eq!(lecturers.len(), 1);
        assert_eq!(lecturers[0].email, "kim@uni.ac.ke");
        assert_eq!(filter_users(&all, None, "").len(), 3);
    }

    #[test]
    fn test_search_matches_name_email_and_id() {
        let all = users();
        assert_eq!(filter_users(&all, None, "otieno").len(), 1);
        assert_eq!(filter_users(&all, None, "ROOT@").len(), 1);
        assert_eq!(filter_users(&all, None, "abc001").len(), 1);
        assert_eq!(filter_users(&all, None, "lec-7").len(), 1);
        assert!(filter_users(&all, Some(Role::Admin), "amy").is_empty());
    }
}
