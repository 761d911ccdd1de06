//! # ServiceHub Guard
//!
//! Client-side counterpart of the server's gates. It decides, from locally
//! cached auth state and without any network call, whether a view may render
//! or where the user should be sent instead.
//!
//! - [`session`]: the [`SessionCache`] owned by the client auth service, and
//!   the read-only [`SessionSource`] contract the guard consumes
//! - [`route`]: [`ProtectedRoute`] and its [`RenderDecision`]
//!
//! The guard is advisory. The server's role gates remain the authorization
//! boundary; this only avoids rendering UI a role cannot act on.
//!
//! # Example
//!
//! ```ignore
//! use servicehub_core::Role;
//! use servicehub_guard::{ProtectedRoute, RenderDecision, SessionCache};
//!
//! let cache = SessionCache::new();
//! let dashboard = ProtectedRoute::new().allow(Role::Provider);
//!
//! match dashboard.evaluate(&cache.snapshot(), "/dashboard") {
//!     RenderDecision::Render => render_dashboard(),
//!     RenderDecision::Redirect(redirect) => navigate(redirect),
//!     RenderDecision::Withhold => {}
//! }
//! ```

pub mod route;
pub mod session;

// Re-export commonly used types at crate root
pub use route::{
    DEFAULT_REDIRECT, FALLBACK_HOME, GuardState, ProtectedRoute, Redirect, RenderDecision,
};
pub use session::{Session, SessionCache, SessionSnapshot, SessionSource, SessionUser};
