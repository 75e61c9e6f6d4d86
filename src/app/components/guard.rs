//! Route protection.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use timetable_types::Role;

use super::cards::Spinner;
use crate::app::state::use_app;
use crate::app::Route;
use crate::auth::guard::{forbidden_url, sign_in_url};
use crate::auth::{authorize, GuardDecision};

/// Render `children` only for a signed-in user whose role is in `roles`.
///
/// Signed-out visitors go to sign-in, others to the forbidden page; either
/// way the requested path travels along as `from`. A 403 from the API
/// while on a guarded page has the same effect as a role mismatch.
#[component]
pub fn RequireAuth(roles: Vec<Role>, children: Element) -> Element {
    let state = use_app();
    let path = use_route::<Route>().to_string();

    let decision = authorize(&state.session.read(), &roles, &path);
    let decision = match decision {
        GuardDecision::Allow if (state.denied)() => GuardDecision::Forbidden { from: path },
        other => other,
    };

    match decision {
        GuardDecision::Pending => rsx! { Spinner {} },
        GuardDecision::Allow => children,
        GuardDecision::SignIn { from } => {
            tracing::debug!("Not signed in, redirecting from {}", from);
            rsx! { Redirect { to: sign_in_url(&from) } }
        }
        GuardDecision::Forbidden { from } => rsx! { Redirect { to: forbidden_url(&from) } },
    }
}

/// Replace the current history entry with `to` once mounted.
#[component]
pub fn Redirect(to: String) -> Element {
    let navigator = use_navigator();

    use_effect(move || match to.parse::<Route>() {
        Ok(route) => {
            navigator.replace(route);
        }
        Err(_) => tracing::warn!("Cannot redirect to unknown path {}", to),
    });

    rsx! {}
}

/// Navigate to an in-app path such as a post-login target.
pub fn push_path(navigator: Navigator, path: &str) {
    match path.parse::<Route>() {
        Ok(route) => {
            navigator.push(route);
        }
        Err(_) => tracing::warn!("Cannot navigate to unknown path {}", path),
    }
}
