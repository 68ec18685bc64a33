//! Permit entities.

pub mod family;
pub mod model;
pub mod status;

pub use family::PermitFamily;
pub use model::{ApplicantName, DetailedPermit, Permit, PermitType};
pub use status::PermitStatus;
