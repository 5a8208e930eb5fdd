//! Client configuration.
//!
//! Defaults live in [`schema`] as named constants. Fallback-to-default is
//! applied once, at construction time; nothing here is mutable afterwards.

pub mod schema;

pub use schema::{
    CacheHint, ClientConfig, RequestOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS,
};
