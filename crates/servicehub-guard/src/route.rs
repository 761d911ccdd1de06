//! Protected-route decisions.
//!
//! [`ProtectedRoute::evaluate`] is a pure function of the session inputs,
//! the route configuration and the current location. Calling it on every
//! render is the whole state machine; there is no separate effect pass.

use servicehub_core::Role;

use crate::session::{SessionSnapshot, SessionSource};

/// Redirect target for unauthenticated visitors unless configured otherwise.
pub const DEFAULT_REDIRECT: &str = "/login";

/// Destination for authenticated users whose role is unknown.
pub const FALLBACK_HOME: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthenticatedAllowed,
    AuthenticatedDenied { role: Option<Role> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// Location to return to after login
    pub from: Option<String>,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    Render,
    Redirect(Redirect),
    /// Render nothing and stay put: the redirect would target the current location.
    Withhold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedRoute {
    allowed_roles: Vec<Role>,
    redirect_to: String,
}

impl Default for ProtectedRoute {
    fn default() -> Self {
        Self {
            allowed_roles: Vec::new(),
            redirect_to: DEFAULT_REDIRECT.to_string(),
        }
    }
}

impl ProtectedRoute {
    /// A route open to any authenticated role.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, role: Role) -> Self {
        if !self.allowed_roles.contains(&role) {
            self.allowed_roles.push(role);
        }
        self
    }

    pub fn allow_roles(self, roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().fold(self, Self::allow)
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    pub fn permits(&self, role: Option<Role>) -> bool {
        self.allowed_roles.is_empty() || role.is_some_and(|role| self.allowed_roles.contains(&role))
    }

    pub fn state(&self, session: &impl SessionSource) -> GuardState {
        let SessionSnapshot {
            authenticated,
            role,
        } = session.snapshot();

        if !authenticated {
            return GuardState::Unauthenticated;
        }

        if self.permits(role) {
            GuardState::AuthenticatedAllowed
        } else {
            GuardState::AuthenticatedDenied { role }
        }
    }

    pub fn evaluate(&self, session: &impl SessionSource, location: &str) -> RenderDecision {
        let redirect = match self.state(session) {
            GuardState::AuthenticatedAllowed => return RenderDecision::Render,
            GuardState::Unauthenticated => Redirect {
                to: self.redirect_to.clone(),
                from: Some(location.to_string()),
                replace: true,
            },
            GuardState::AuthenticatedDenied { role } => Redirect {
                to: role
                    .map_or(FALLBACK_HOME, |role| role.home_path())
                    .to_string(),
                from: None,
                replace: true,
            },
        };

        if redirect.to == location {
            tracing::warn!(location, "Guard redirect targets the current location; withholding");
            return RenderDecision::Withhold;
        }

        RenderDecision::Redirect(redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionSnapshot;

    fn signed_in(role: Option<Role>) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: true,
            role,
        }
    }

    fn signed_out(role: Option<Role>) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: false,
            role,
        }
    }

    fn redirect(to: &str, from: Option<&str>) -> RenderDecision {
        RenderDecision::Redirect(Redirect {
            to: to.to_string(),
            from: from.map(str::to_string),
            replace: true,
        })
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_origin() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(route.state(&signed_out(None)), GuardState::Unauthenticated);
        assert_eq!(
            route.evaluate(&signed_out(None), "/dashboard"),
            redirect("/login", Some("/dashboard"))
        );
    }

    #[test]
    fn test_unauthenticated_ignores_allowed_roles_and_cached_role() {
        for route in [
            ProtectedRoute::new(),
            ProtectedRoute::new().allow(Role::Customer),
            ProtectedRoute::new().allow_roles(Role::ALL),
        ] {
            assert_eq!(
                route.evaluate(&signed_out(Some(Role::Customer)), "/profile"),
                redirect("/login", Some("/profile"))
            );
        }
    }

    #[test]
    fn test_custom_redirect_target() {
        let route = ProtectedRoute::new().redirect_to("/signin");
        assert_eq!(
            route.evaluate(&signed_out(None), "/bookings"),
            redirect("/signin", Some("/bookings"))
        );
    }

    #[test]
    fn test_empty_allow_set_admits_any_role() {
        let route = ProtectedRoute::new();
        for role in Role::ALL {
            assert_eq!(
                route.evaluate(&signed_in(Some(role)), "/profile"),
                RenderDecision::Render
            );
        }
        assert_eq!(
            route.state(&signed_in(None)),
            GuardState::AuthenticatedAllowed
        );
    }

    #[test]
    fn test_allowed_role_renders() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(
            route.evaluate(&signed_in(Some(Role::Provider)), "/dashboard"),
            RenderDecision::Render
        );
    }

    #[test]
    fn test_customer_denied_goes_home() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(
            route.state(&signed_in(Some(Role::Customer))),
            GuardState::AuthenticatedDenied {
                role: Some(Role::Customer)
            }
        );
        assert_eq!(
            route.evaluate(&signed_in(Some(Role::Customer)), "/dashboard"),
            redirect("/", None)
        );
    }

    #[test]
    fn test_provider_denied_goes_to_dashboard() {
        let route = ProtectedRoute::new().allow(Role::Customer);
        assert_eq!(
            route.evaluate(&signed_in(Some(Role::Provider)), "/bookings"),
            redirect("/dashboard", None)
        );
    }

    #[test]
    fn test_unknown_role_denied_falls_back_home() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(
            route.evaluate(&signed_in(None), "/dashboard"),
            redirect(FALLBACK_HOME, None)
        );
    }

    #[test]
    fn test_redirect_to_current_location_is_withheld() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(
            route.evaluate(&signed_in(Some(Role::Customer)), "/"),
            RenderDecision::Withhold
        );

        let login = ProtectedRoute::new();
        assert_eq!(
            login.evaluate(&signed_out(None), "/login"),
            RenderDecision::Withhold
        );
    }

    #[test]
    fn test_allow_deduplicates() {
        let route = ProtectedRoute::new()
            .allow(Role::Customer)
            .allow(Role::Customer)
            .allow(Role::Provider);
        assert_eq!(route.allowed_roles(), &[Role::Customer, Role::Provider]);
    }

    /// Serves guard inputs only as a single snapshot.
    struct SnapshotOnly(SessionSnapshot);

    impl SessionSource for SnapshotOnly {
        fn is_authenticated(&self) -> bool {
            panic!("guard must read a snapshot")
        }

        fn user_role(&self) -> Option<Role> {
            panic!("guard must read a snapshot")
        }

        fn snapshot(&self) -> SessionSnapshot {
            self.0
        }
    }

    #[test]
    fn test_guard_reads_inputs_in_one_snapshot() {
        let route = ProtectedRoute::new().allow(Role::Provider);
        assert_eq!(
            route.evaluate(&SnapshotOnly(signed_in(Some(Role::Provider))), "/dashboard"),
            RenderDecision::Render
        );
        assert_eq!(
            route.state(&SnapshotOnly(signed_in(Some(Role::Customer)))),
            GuardState::AuthenticatedDenied {
                role: Some(Role::Customer)
            }
        );
    }

    #[test]
    fn test_decision_is_stable_across_renders() {
        let route = ProtectedRoute::new().allow(Role::Customer);
        let session = signed_in(Some(Role::Provider));
        let first = route.evaluate(&session, "/bookings");
        let second = route.evaluate(&session, "/bookings");
        assert_eq!(first, second);
    }
}
