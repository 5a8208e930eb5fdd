//! Typed endpoint mappings for the GateKey REST resources.
//!
//! Each method is a 1:1 parameter-to-endpoint mapping with no logic of its
//! own; executor errors propagate unchanged to the application.

pub mod keys;
pub mod plans;
pub mod types;
pub mod users;
pub mod validate;

pub use types::{
    ApiKey, ApiResponse, CreateKeyRequest, CreatePlanRequest, CreateUserRequest, ListParams,
    Paginated, Plan, UpdateKeyRequest, UpdatePlanRequest, UpdateUserRequest, UsageDetails, User,
    UserUsage, ValidationOutcome,
};
