//! # permit-core
//!
//! Core crate for the permit portal. Contains configuration schemas,
//! typed identifiers, auth-state events, the persistence error
//! classification, and the unified error system.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod store;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use store::{StoreError, StoreErrorKind, StoreResult};
