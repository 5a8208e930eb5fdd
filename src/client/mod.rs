//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! resource method (keys/plans/users/validate)
//!     → executor.rs (build request, merge headers, resolve timeout)
//!     → reqwest (single outbound call, no retries)
//!     → error.rs (normalize any failure into ApiError)
//! ```

pub mod error;
pub mod executor;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use executor::Client;
