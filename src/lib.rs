//! # permit-portal
//!
//! Permit lifecycle reconciliation for a municipal permit portal: identity
//! provisioning under commit lag, derived payment status, role-gated access,
//! and guarded notify/print actions.
//!
//! [`Portal`] wires the workspace crates together over a set of
//! [`PortalBackends`], either PostgreSQL or in-memory.

pub mod backends;
pub mod portal;
pub mod telemetry;

pub use backends::{MemoryBackends, PortalBackends};
pub use portal::Portal;
pub use telemetry::init_logging;
