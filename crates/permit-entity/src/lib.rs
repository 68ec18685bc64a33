//! # permit-entity
//!
//! Domain entity models for the permit portal. Every struct in this crate
//! represents a database table row, a joined read model, or a computed
//! view. Flat table rows additionally derive `sqlx::FromRow`.

pub mod notification;
pub mod payment;
pub mod permit;
pub mod profile;
pub mod upload;
pub mod view;

pub use notification::{NotificationKind, NotificationRecord};
pub use payment::{Payment, PaymentStatus};
pub use permit::{ApplicantName, DetailedPermit, Permit, PermitFamily, PermitStatus, PermitType};
pub use profile::{Principal, Profile, ProfileFields, Role};
pub use upload::{ImageCategory, UploadedImage};
pub use view::DerivedPermitView;
