//! Shared value types used across all portal crates.

pub mod id;

pub use id::{ImageId, NotificationId, PaymentId, PermitId, PermitTypeId, PrincipalId};
