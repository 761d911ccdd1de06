//! ServiceHub Observability
//!
//! - [`init_tracing`]: console logging plus an optional rolling JSON log file
//! - [`init_basic_console_logging`]: console-only setup for the CLI
//! - [`logging_middleware`]: per-request log lines with a request id
//!
//! # Examples
//!
//! ```no_run
//! use servicehub_observability::init_tracing;
//!
//! let _guard = init_tracing();
//! ```

pub mod basic_logging;
pub mod logging;

pub use basic_logging::init_basic_console_logging;
pub use logging::{REQUEST_ID_HEADER, init_tracing, logging_middleware};
