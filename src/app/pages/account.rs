//! Account settings, shared by all three portals.

use base64::Engine;
use dioxus::prelude::*;
use timetable_types::user::{NotificationPreferences, ProfileUpdate};
use timetable_types::{Role, User};

use crate::app::components::{Modal, PageHeader, TextField};
use crate::app::state::{use_app, AppState};
use crate::app::Route;
use crate::validation::validate_password_change;

#[component]
pub fn StudentAccount() -> Element {
    rsx! { AccountPage {} }
}

#[component]
pub fn LecturerAccount() -> Element {
    rsx! { AccountPage {} }
}

#[component]
pub fn AdminAccount() -> Element {
    rsx! { AccountPage {} }
}

fn identifier_label(role: Role) -> &'static str {
    match role {
        Role::Student => "Registration Number",
        Role::Lecturer => "Lecturer ID",
        Role::Admin => "Admin ID",
    }
}

/// `user-data-2025-03-04.json`
fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("user-data-{}.json", date.format("%Y-%m-%d"))
}

fn json_data_url(json: &str) -> String {
    format!(
        "data:application/json;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(json)
    )
}

/// Script that downloads `url` as `file_name` through a temporary link.
fn download_script(url: &str, file_name: &str) -> String {
    let url = serde_json::Value::String(url.to_string());
    let file_name = serde_json::Value::String(file_name.to_string());
    format!(
        r#"
        const link = document.createElement('a');
        link.href = {url};
        link.setAttribute('download', {file_name});
        document.body.appendChild(link);
        link.click();
        link.remove();
        "#
    )
}

#[component]
fn AccountPage() -> Element {
    let state = use_app();
    let Some(user) = state.user() else {
        return rsx! {};
    };

    rsx! {
        PageHeader {
            title: "Account Settings",
            subtitle: "Manage your profile, security and privacy",
        }
        Overview { user: user.clone() }
        {rsx! { ProfileForm { key: "{user.id}", user: user.clone() } }}
        NotificationSettings {}
        PasswordForm {}
        DataExport {}
        DangerZone {}
    }
}

#[component]
fn Overview(user: User) -> Element {
    let identifier = user.role_identifier().unwrap_or("-").to_string();

    rsx! {
        article {
            header { style: "display:flex;gap:1rem;align-items:center;",
                span { class: "avatar", "{user.initial()}" }
                hgroup { style: "margin:0;",
                    h3 { "{user.display_name()}" }
                    p { span { class: "badge", "{user.role.label()}" } }
                }
            }
            div { class: "grid",
                div {
                    small { "Email Address" }
                    p { "{user.email}" }
                }
                div {
                    small { "{identifier_label(user.role)}" }
                    p { "{identifier}" }
                }
            }
        }
    }
}

#[component]
fn ProfileForm(user: User) -> Element {
    let state = use_app();
    let initial = ProfileUpdate::from_user(&user);
    let name = use_signal(|| initial.name.clone());
    let phone = use_signal(|| initial.phone.clone());
    let country_code = use_signal(|| initial.country_code.clone());
    let address = use_signal(|| initial.address.clone());
    let city = use_signal(|| initial.city.clone());
    let country = use_signal(|| initial.country.clone());
    let mut bio = use_signal(|| initial.bio.clone());
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let update = ProfileUpdate {
            name: name().trim().to_string(),
            phone: phone().trim().to_string(),
            country_code: country_code().trim().to_string(),
            address: address().trim().to_string(),
            city: city().trim().to_string(),
            country: country().trim().to_string(),
            bio: bio().trim().to_string(),
        };
        saving.set(true);
        spawn(async move {
            let saved = state
                .call("Failed to update profile", |api| async move {
                    api.update_profile(&update).await
                })
                .await;
            if saved.is_some() {
                state.success("Your profile has been updated");
                refresh_user(state).await;
            }
            saving.set(false);
        });
    };

    rsx! {
        article {
            header { strong { "Profile" } }
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Full Name", value: name, disabled: saving() }
                    label {
                        "Email Address"
                        input { r#type: "email", value: "{user.email}", disabled: true }
                    }
                }
                div { class: "grid",
                    TextField { label: "Country Code", value: country_code, placeholder: "+254", disabled: saving() }
                    TextField { label: "Phone Number", value: phone, kind: "tel", disabled: saving() }
                }
                TextField { label: "Address", value: address, disabled: saving() }
                div { class: "grid",
                    TextField { label: "City", value: city, disabled: saving() }
                    TextField { label: "Country", value: country, disabled: saving() }
                }
                label {
                    "Bio"
                    textarea {
                        rows: "3",
                        value: "{bio}",
                        disabled: saving(),
                        oninput: move |evt| bio.set(evt.value()),
                    }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Save Profile" }
            }
        }
    }
}

/// Reload the signed-in user after a profile change.
async fn refresh_user(state: AppState) {
    if let Some(user) = state.call("Failed to reload profile", |api| async move { api.me().await }).await {
        state.signed_in(user);
    }
}

#[component]
fn NotificationSettings() -> Element {
    let state = use_app();
    let mut prefs = use_signal(NotificationPreferences::default);
    let current = prefs();

    let save = move |_| {
        let prefs = prefs();
        spawn(async move {
            let saved = state
                .call("Failed to save preferences", |api| async move {
                    api.set_notification_preferences(&prefs).await
                })
                .await;
            if saved.is_some() {
                state.success("Notification preferences updated");
            }
        });
    };

    rsx! {
        article {
            header { strong { "Notifications" } }
            fieldset {
                label {
                    input {
                        r#type: "checkbox",
                        role: "switch",
                        checked: current.email_notifications,
                        onchange: move |_| prefs.write().email_notifications ^= true,
                    }
                    "Email Notifications"
                }
                label {
                    input {
                        r#type: "checkbox",
                        role: "switch",
                        checked: current.login_alerts,
                        onchange: move |_| prefs.write().login_alerts ^= true,
                    }
                    "Login Alerts"
                }
                label {
                    input {
                        r#type: "checkbox",
                        role: "switch",
                        checked: current.activity_updates,
                        onchange: move |_| prefs.write().activity_updates ^= true,
                    }
                    "Activity Updates"
                }
                label {
                    input {
                        r#type: "checkbox",
                        role: "switch",
                        checked: current.news_and_updates,
                        onchange: move |_| prefs.write().news_and_updates ^= true,
                    }
                    "News & Updates"
                }
            }
            button { class: "secondary", onclick: save, "Save Preferences" }
        }
    }
}

#[component]
fn PasswordForm() -> Element {
    let state = use_app();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let change = match validate_password_change(&current(), &new_password(), &confirm()) {
            Ok(change) => change,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        saving.set(true);
        spawn(async move {
            let changed = state
                .call_with_password(
                    "Failed to change password. Please check your current password.",
                    |api| async move { api.change_password(&change).await },
                )
                .await;
            if changed.is_some() {
                current.set(String::new());
                new_password.set(String::new());
                confirm.set(String::new());
                state.success("Your password has been updated");
            }
            saving.set(false);
        });
    };

    rsx! {
        article {
            header { strong { "Change Password" } }
            form { onsubmit,
                TextField { label: "Current Password", value: current, kind: "password", disabled: saving() }
                div { class: "grid",
                    TextField { label: "New Password", value: new_password, kind: "password", disabled: saving() }
                    TextField { label: "Confirm New Password", value: confirm, kind: "password", disabled: saving() }
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Update Password" }
            }
        }
    }
}

#[component]
fn DataExport() -> Element {
    let state = use_app();
    let mut busy = use_signal(|| false);

    let download = move |_| {
        busy.set(true);
        spawn(async move {
            let export = state
                .call("Failed to export data", |api| async move { api.data_export().await })
                .await;
            if let Some(data) = export {
                match serde_json::to_string_pretty(&data) {
                    Ok(json) => {
                        let name = export_file_name(chrono::Local::now().date_naive());
                        let _ = document::eval(&download_script(&json_data_url(&json), &name));
                        state.success("Your data has been downloaded");
                    }
                    Err(e) => state.error("Error", format!("Failed to export data: {e}")),
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        article {
            header { strong { "Privacy" } }
            p { "Download Your Data" }
            small { "A JSON copy of everything stored about your account." }
            p {
                button { class: "outline", aria_busy: "{busy}", disabled: busy(), onclick: download, "Download" }
            }
        }
    }
}

#[component]
fn DangerZone() -> Element {
    let state = use_app();
    let navigator = use_navigator();
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let delete = move |_| {
        deleting.set(true);
        spawn(async move {
            let deleted = state
                .call("Failed to delete account", |api| async move {
                    api.delete_account().await
                })
                .await;
            deleting.set(false);
            confirming.set(false);
            if deleted.is_some() {
                tracing::info!("Account deleted");
                state.sign_out();
                state.info("Account deleted", "Your account has been removed.");
                navigator.push(Route::Index {});
            }
        });
    };

    rsx! {
        article {
            header { strong { "Danger Zone" } }
            p { "Delete Account" }
            small { "Permanently remove your account and all associated data." }
            p {
                button { class: "contrast", onclick: move |_| confirming.set(true), "Delete Account" }
            }
        }
        if confirming() {
            Modal { title: "Delete account?", on_close: move |_| confirming.set(false),
                p { "This cannot be undone." }
                footer {
                    button { class: "secondary", onclick: move |_| confirming.set(false), "Cancel" }
                    button { aria_busy: "{deleting}", disabled: deleting(), onclick: delete, "Delete" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(export_file_name(date), "user-data-2025-03-04.json");
    }

    #[test]
    fn test_json_data_url() {
        let url = json_data_url("{}");
        assert_eq!(url, "data:application/json;base64,e30=");
    }

    #[test]
    fn test_download_script_escapes() {
        let script = download_script("data:x", "a'b\".json");
        assert!(script.contains(r#"link.href = "data:x";"#));
        assert!(script.contains(r#"'download', "a'b\".json""#));
    }
}
