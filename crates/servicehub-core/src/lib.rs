//! # ServiceHub Core
//!
//! Core types shared by every ServiceHub crate:
//!
//! - [`role`]: the closed [`Role`] taxonomy (customers and service providers)
//! - [`errors`]: [`AppError`], the HTTP error type returned by handlers
//! - [`response`]: the `{ success, message, data }` JSON envelope
//! - [`password`]: bcrypt hashing helpers used by the account directory
//!
//! # Example
//!
//! ```ignore
//! use servicehub_core::{AppError, Role};
//!
//! let role: Role = "provider".parse()?;
//! let error = AppError::not_found(anyhow::anyhow!("User not found."));
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod role;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody};
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, MessageResponse};
pub use role::{ParseRoleError, Role};
