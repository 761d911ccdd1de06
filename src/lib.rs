//! # ServiceHub API
//!
//! Authentication and role authorization for a marketplace that connects
//! customers with service providers.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── servicehub-core/           # Role, AppError, response envelope, password hashing
//! ├── servicehub-config/         # JWT, CORS and server configuration
//! ├── servicehub-auth/           # Token issuer/verifier, Authentication Gate, RoleGate
//! ├── servicehub-guard/          # Client-side protected-route decisions
//! └── servicehub-observability/  # Tracing setup and request logging
//! src/
//! ├── middleware/   # AuthUser extractor, role layers and extractors
//! ├── modules/
//! │   ├── accounts/ # Account directory
//! │   └── auth/     # register, login, refresh, logout, me
//! ├── docs.rs       # OpenAPI document
//! ├── router.rs     # Route table, CORS and request logging
//! └── state.rs      # Shared application state
//! ```
//!
//! ## Route table
//!
//! | Method | Path | Gate |
//! |--------|------|------|
//! | POST | `/api/auth/register` | none |
//! | POST | `/api/auth/login` | none |
//! | POST | `/api/auth/refresh` | none |
//! | POST | `/api/auth/logout` | none |
//! | GET | `/api/auth/me` | Authentication Gate |
//! | GET | `/health` | none |
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key   # required
//! JWT_ACCESS_EXPIRY=3600
//! JWT_REFRESH_EXPIRY=604800
//! ALLOWED_ORIGINS=http://localhost:5173,http://localhost:3000
//! HOST=0.0.0.0
//! PORT=5000
//! LOG_DIR=./logs                      # optional JSON log file
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use servicehub_auth;
pub use servicehub_config;
pub use servicehub_core;
pub use servicehub_observability;
