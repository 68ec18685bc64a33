//! # permit-database
//!
//! The persistence boundary of the permit portal: store traits consumed by
//! the auth and service crates, PostgreSQL implementations over `sqlx`,
//! and in-memory implementations with the same contracts.
//!
//! Every store call returns a [`permit_core::StoreResult`], so callers see
//! a typed [`permit_core::StoreErrorKind`] rather than driver errors.

pub mod connection;
mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{
    NotificationStore, PaymentStore, PermitStore, PrincipalDirectory, ProfileStore, UploadStore,
};
