//! Middleware and extractors for request processing.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor and the [`auth::require_auth`] layer
//! - [`role`]: role layers and the `CustomerOnly` / `ProviderOnly` extractors
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the token and caches the identity in request extensions
//! 3. Role layers or extractors check the identity's role
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::ProviderOnly;
//!
//! // Any valid token
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.subject();
//!     // ...
//! }
//!
//! // Providers only
//! async fn list_jobs(ProviderOnly(auth_user): ProviderOnly) -> impl IntoResponse {
//!     // ...
//! }
//!
//! // Or as a route layer
//! Router::new()
//!     .route("/bookings", post(create_booking))
//!     .route_layer(middleware::from_fn_with_state(state, require_customer));
//! ```

pub mod auth;
pub mod role;
