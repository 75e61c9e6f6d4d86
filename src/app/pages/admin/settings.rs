use dioxus::prelude::*;

use crate::app::components::{NumberField, PageHeader, TextField};
use crate::app::state::use_app;

/// Preferences for timetable generation. Held on this page only; the API has
/// no settings endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Preferences {
    auto_assign_rooms: bool,
    same_building: bool,
    lab_matching: bool,
    soft_conflicts: bool,
    conflict_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_assign_rooms: true,
            same_building: true,
            lab_matching: true,
            soft_conflicts: false,
            conflict_notifications: true,
        }
    }
}

#[component]
pub fn AdminSettings() -> Element {
    let state = use_app();
    let start_time = use_signal(|| "08:00".to_string());
    let end_time = use_signal(|| "17:00".to_string());
    let class_minutes = use_signal(|| 60u32);
    let break_minutes = use_signal(|| 10u32);
    let mut prefs = use_signal(Preferences::default);

    let save = move |_| {
        tracing::debug!(
            start = %start_time(),
            end = %end_time(),
            class_minutes = class_minutes(),
            break_minutes = break_minutes(),
            prefs = ?prefs(),
            "Scheduling settings saved"
        );
        state.info("Settings Saved", "Your scheduling preferences have been updated.");
    };

    rsx! {
        PageHeader {
            title: "Scheduling Settings",
            subtitle: "Configure constraints and preferences for timetable generation",
        }

        article {
            header {
                strong { "Time Constraints" }
                small { class: "muted", style: "display:block;", "Define scheduling hours" }
            }
            div { class: "grid",
                TextField { label: "Start Time", value: start_time, kind: "time" }
                TextField { label: "End Time", value: end_time, kind: "time" }
            }
            div { class: "grid",
                NumberField { label: "Class Duration (minutes)", value: class_minutes, min: 1 }
                NumberField { label: "Break Duration (minutes)", value: break_minutes }
            }
        }

        article {
            header {
                strong { "Room Allocation" }
                small { class: "muted", style: "display:block;", "Room assignment preferences" }
            }
            Toggle {
                title: "Auto-assign rooms",
                hint: "Automatically select optimal rooms based on capacity",
                checked: prefs().auto_assign_rooms,
                on_change: move |on| prefs.with_mut(|p| p.auto_assign_rooms = on),
            }
            Toggle {
                title: "Prioritize same building",
                hint: "Keep consecutive classes in the same building",
                checked: prefs().same_building,
                on_change: move |on| prefs.with_mut(|p| p.same_building = on),
            }
            Toggle {
                title: "Lab room matching",
                hint: "Match courses requiring labs to appropriate rooms",
                checked: prefs().lab_matching,
                on_change: move |on| prefs.with_mut(|p| p.lab_matching = on),
            }
        }

        article {
            header {
                strong { "Conflict Resolution" }
                small { class: "muted", style: "display:block;", "How to handle scheduling conflicts" }
            }
            Toggle {
                title: "Allow soft conflicts",
                hint: "Allow scheduling with warnings for non-critical overlaps",
                checked: prefs().soft_conflicts,
                on_change: move |on| prefs.with_mut(|p| p.soft_conflicts = on),
            }
            Toggle {
                title: "Send conflict notifications",
                hint: "Notify affected users about scheduling conflicts",
                checked: prefs().conflict_notifications,
                on_change: move |on| prefs.with_mut(|p| p.conflict_notifications = on),
            }
        }

        div { class: "actions", style: "justify-content:flex-end;",
            button { onclick: save, "Save Settings" }
        }
    }
}

#[component]
fn Toggle(
    #[props(into)] title: String,
    #[props(into)] hint: String,
    checked: bool,
    on_change: EventHandler<bool>,
) -> Element {
    rsx! {
        div { class: "list-item",
            div {
                strong { "{title}" }
                small { class: "muted", style: "display:block;", "{hint}" }
            }
            input {
                r#type: "checkbox",
                role: "switch",
                checked,
                onchange: move |evt| on_change.call(evt.checked()),
            }
        }
    }
}
