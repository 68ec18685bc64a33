//! In-memory store implementations using Tokio locks.
//!
//! Suitable for single-node runs and tests. Each store honours the same
//! contract as its PostgreSQL counterpart, including the profile foreign
//! key on principal visibility.

pub mod notification;
pub mod payment;
pub mod permit;
pub mod profile;
pub mod upload;

pub use notification::MemoryNotificationStore;
pub use payment::MemoryPaymentStore;
pub use permit::MemoryPermitStore;
pub use profile::MemoryProfileStore;
pub use upload::MemoryUploadStore;
