//! Route access decisions.
//!
//! Pure functions: given the session and a path, decide whether to render,
//! wait, or redirect. The `RequireAuth` component acts on the decision.

use timetable_types::{Role, User};

use super::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; render nothing yet.
    Pending,
    Allow,
    /// Not signed in; go to sign-in and come back to `from`.
    SignIn { from: String },
    /// Signed in with a role the route does not admit.
    Forbidden { from: String },
}

/// Decide access to `path` for a route admitting `allowed` roles.
///
/// An empty `allowed` list admits any signed-in user.
pub fn authorize(session: &SessionState, allowed: &[Role], path: &str) -> GuardDecision {
    if session.loading {
        return GuardDecision::Pending;
    }
    let Some(user) = &session.user else {
        return GuardDecision::SignIn {
            from: path.to_string(),
        };
    };
    if allowed.is_empty() || allowed.contains(&user.role) {
        GuardDecision::Allow
    } else {
        GuardDecision::Forbidden {
            from: path.to_string(),
        }
    }
}

pub fn portal_prefix(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/",
        Role::Lecturer => "/lecturer/",
        Role::Admin => "/admin/",
    }
}

pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/dashboard",
        Role::Lecturer => "/lecturer/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

pub fn login_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/login",
        Role::Lecturer => "/lecturer/login",
        Role::Admin => "/admin/login",
    }
}

pub fn register_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/register",
        Role::Lecturer => "/lecturer/register",
        Role::Admin => "/admin/register",
    }
}

pub fn account_path(role: Role) -> String {
    format!("{}account", portal_prefix(role))
}

/// Where to go after signing in: back to `from` if it is inside the role's
/// portal (and not itself a sign-in page), else the role's dashboard.
pub fn post_login_target(role: Role, from: Option<&str>) -> String {
    let from = from.map(str::trim).filter(|f| !f.is_empty());
    match from {
        Some(path)
            if path.starts_with(portal_prefix(role))
                && path != login_path(role)
                && path != register_path(role) =>
        {
            path.to_string()
        }
        _ => dashboard_path(role).to_string(),
    }
}

/// Landing, generic login and generic register pages.
pub fn is_public_auth_page(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    matches!(path, "/" | "/login" | "/register")
}

/// After a session is restored on one of the public auth pages, the
/// dashboard to send the user to instead.
pub fn public_auth_redirect(path: &str, user: Option<&User>) -> Option<&'static str> {
    match user {
        Some(user) if is_public_auth_page(path) => Some(dashboard_path(user.role)),
        _ => None,
    }
}

/// `/login?from=<path>`
pub fn sign_in_url(from: &str) -> String {
    format!("/login?from={}", urlencoding::encode(from))
}

/// `/forbidden?from=<path>`
pub fn forbidden_url(from: &str) -> String {
    format!("/forbidden?from={}", urlencoding::encode(from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(role: Option<Role>) -> SessionState {
        SessionState {
            user: role.map(|r| User::from_claims("x@uni.ac.ke", r)),
            loading: false,
        }
    }

    #[test]
    fn test_loading_is_pending() {
        let loading = SessionState {
            user: None,
            loading: true,
        };
        assert_eq!(
            authorize(&loading, &[Role::Admin], "/admin/rooms"),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_unauthenticated_signs_in_with_from() {
        assert_eq!(
            authorize(&state(None), &[Role::Student], "/student/timetable"),
            GuardDecision::SignIn {
                from: "/student/timetable".into()
            }
        );
    }

    #[test]
    fn test_wrong_role_forbidden() {
        assert_eq!(
            authorize(&state(Some(Role::Student)), &[Role::Admin], "/admin/users"),
            GuardDecision::Forbidden {
                from: "/admin/users".into()
            }
        );
        assert_eq!(
            authorize(&state(Some(Role::Admin)), &[Role::Admin], "/admin/users"),
            GuardDecision::Allow
        );
        assert_eq!(
            authorize(&state(Some(Role::Lecturer)), &[], "/anything"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_post_login_target() {
        assert_eq!(
            post_login_target(Role::Student, Some("/student/clashes")),
            "/student/clashes"
        );
        // Someone else's portal goes to own dashboard
        assert_eq!(
            post_login_target(Role::Student, Some("/admin/users")),
            "/student/dashboard"
        );
        assert_eq!(post_login_target(Role::Lecturer, None), "/lecturer/dashboard");
        assert_eq!(
            post_login_target(Role::Admin, Some("/admin/login")),
            "/admin/dashboard"
        );
    }

    #[test]
    fn test_public_auth_redirect() {
        let lecturer = User::from_claims("l@uni.ac.ke", Role::Lecturer);
        assert_eq!(
            public_auth_redirect("/", Some(&lecturer)),
            Some("/lecturer/dashboard")
        );
        assert_eq!(
            public_auth_redirect("/login?from=%2Fx", Some(&lecturer)),
            Some("/lecturer/dashboard")
        );
        assert_eq!(public_auth_redirect("/lecturer/schedule", Some(&lecturer)), None);
        assert_eq!(public_auth_redirect("/", None), None);
        // Role-specific login pages are not redirected
        assert!(!is_public_auth_page("/student/login"));
    }

    #[test]
    fn test_redirect_urls_encode_from() {
        assert_eq!(
            sign_in_url("/admin/course/abc"),
            "/login?from=%2Fadmin%2Fcourse%2Fabc"
        );
        assert_eq!(forbidden_url("/admin"), "/forbidden?from=%2Fadmin");
        assert_eq!(account_path(Role::Lecturer), "/lecturer/account");
    }
}
