//! Page chrome: the public layout and the portal layout with sidebar.

use dioxus::prelude::*;

use super::sidebar::Sidebar;
use crate::app::Route;

pub const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";

/// CSS styles for the application (extends Pico CSS).
pub const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; --sidebar-width: 15rem; }
small, .muted { color: var(--pico-muted-color); }
.portal { display: flex; min-height: 100vh; }
.portal-main { flex: 1; padding: 1.5rem 2rem; overflow: auto; }
/* Sidebar */
.sidebar { width: var(--sidebar-width); flex-shrink: 0; display: flex; flex-direction: column; border-right: 1px solid var(--pico-muted-border-color); padding: 1rem 0.75rem; transition: width .2s; }
.sidebar.collapsed { width: 4.5rem; }
.sidebar .brand { display: flex; align-items: center; justify-content: space-between; margin-bottom: 1.5rem; }
.sidebar .brand strong { font-size: 1.2rem; }
.sidebar .brand small { display: block; }
.sidebar nav ul { display: flex; flex-direction: column; padding: 0; margin: 0; }
.sidebar nav li { padding: 0.1rem 0; width: 100%; }
.sidebar nav a { display: flex; gap: 0.75rem; padding: 0.5rem 0.75rem; border-radius: var(--pico-border-radius); text-decoration: none; }
.sidebar nav a.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.sidebar .profile { margin-top: auto; border-top: 1px solid var(--pico-muted-border-color); padding-top: 1rem; }
.sidebar .profile a, .sidebar .profile button { display: block; width: 100%; margin: 0.25rem 0; font-size: 0.85rem; }
.avatar { display: inline-flex; align-items: center; justify-content: center; width: 2rem; height: 2rem; border-radius: 50%; background: var(--pico-primary-background); color: var(--pico-primary-inverse); font-weight: 600; }
/* Cards and stats */
.page-header { display: flex; justify-content: space-between; align-items: flex-start; gap: 1rem; margin-bottom: 1.5rem; }
.page-header h1 { margin-bottom: 0.25rem; }
.stats-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
.stats-grid article { margin: 0; }
.stat-value { font-size: 2rem; font-weight: 700; margin: 0; }
.card-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1rem; }
.card-grid article { margin: 0; }
.course-card { border-left: 4px solid var(--course-color, var(--pico-primary)); }
.badge { display: inline-block; padding: 0.1rem 0.6rem; border-radius: 999px; font-size: 0.75rem; font-weight: 600; background: var(--pico-secondary-background); color: var(--pico-secondary-inverse); }
.badge.success { background: #2e7d32; color: #fff; }
.badge.warning { background: #ed6c02; color: #fff; }
.badge.danger { background: var(--pico-del-color); color: #fff; }
.actions { display: flex; gap: 0.5rem; flex-wrap: wrap; }
.actions button, .actions a[role=button] { margin: 0; padding: 0.4rem 0.9rem; }
.centered { text-align: center; padding: 3rem 1rem; }
.list-item { border: 1px solid var(--pico-muted-border-color); border-radius: var(--pico-border-radius); padding: 0.75rem; margin-bottom: 0.75rem; }
.list-item button { width: 100%; margin: 0.5rem 0 0; padding: 0.3rem; }
/* Timetable grid */
.timetable-grid { overflow-x: auto; }
.timetable-grid table { table-layout: fixed; min-width: 800px; }
.timetable-grid th:first-child { width: 8rem; }
.grid-cell { position: relative; border-left: 3px solid var(--course-color, var(--pico-primary)); padding: 0.35rem 0.5rem; border-radius: 4px; font-size: 0.8rem; background: var(--pico-card-sectioning-background-color); }
.grid-cell.clash { border-left-color: var(--pico-del-color); }
.clash-indicator { color: var(--pico-del-color); font-weight: 600; display: block; }
.avail-dot { position: absolute; top: 0.35rem; right: 0.35rem; width: 0.5rem; height: 0.5rem; border-radius: 50%; }
.avail-dot.available { background: #2e7d32; }
.avail-dot.unavailable { background: var(--pico-del-color); }
/* Slot tables */
.slot-table td { text-align: center; }
.slot-table button { margin: 0; padding: 0.25rem 0.6rem; font-size: 0.8rem; }
.slot-booked { color: var(--pico-del-color); }
.slot-selected { color: #2e7d32; font-weight: 600; }
/* Toasts */
.toaster { position: fixed; bottom: 1rem; right: 1rem; z-index: 1000; display: flex; flex-direction: column; gap: 0.5rem; max-width: 24rem; }
.toast { margin: 0; padding: 0.75rem 1rem; box-shadow: var(--pico-card-box-shadow); }
.toast.success { border-left: 4px solid #2e7d32; }
.toast.destructive { border-left: 4px solid var(--pico-del-color); }
.toast header { display: flex; justify-content: space-between; margin: 0 0 0.25rem; padding: 0; background: none; border: none; }
.toast button { margin: 0; padding: 0 0.4rem; }
"#;

/// Layout for the landing, sign-in and registration pages.
#[component]
pub fn PublicLayout() -> Element {
    rsx! {
        header { class: "container",
            nav {
                ul {
                    li {
                        Link { to: Route::Index {}, strong { "TimeTable" } }
                    }
                }
                ul {
                    li { Link { to: Route::Login { from: String::new() }, "Sign in" } }
                    li { Link { to: Route::Register {}, "Register" } }
                }
            }
        }
        main { class: "container",
            Outlet::<Route> {}
        }
        Footer {}
    }
}

/// Layout for the signed-in portals: sidebar plus page content.
#[component]
pub fn DashboardLayout(children: Element) -> Element {
    rsx! {
        div { class: "portal",
            Sidebar {}
            main { class: "portal-main",
                {children}
                Footer {}
            }
        }
    }
}

#[component]
fn Footer() -> Element {
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        footer {
            class: "container",
            style: "display:flex;justify-content:space-between;align-items:center;",
            small { "TimeTable Portal v{version}" }
        }
    }
}

/// Title and subtitle row at the top of a page, with optional actions.
#[component]
pub fn PageHeader(
    #[props(into)] title: String,
    #[props(into, default)] subtitle: String,
    actions: Option<Element>,
) -> Element {
    rsx! {
        document::Title { "{title} - TimeTable" }
        div { class: "page-header",
            hgroup {
                h1 { "{title}" }
                if !subtitle.is_empty() {
                    p { "{subtitle}" }
                }
            }
            if let Some(actions) = actions {
                div { class: "actions", {actions} }
            }
        }
    }
}
