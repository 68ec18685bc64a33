//! Events emitted at the auth boundary.
//!
//! The auth subsystem broadcasts [`AuthEvent`]s to every subscriber; the
//! recovery waiter and session-aware callers listen for them instead of
//! polling.

pub mod auth;

pub use auth::AuthEvent;
