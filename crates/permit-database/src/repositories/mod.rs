//! PostgreSQL implementations of the store traits.

pub mod notification;
pub mod payment;
pub mod permit;
pub mod principal;
pub mod profile;
pub mod upload;

pub use notification::NotificationRepository;
pub use payment::PaymentRepository;
pub use permit::PermitRepository;
pub use principal::PrincipalRepository;
pub use profile::ProfileRepository;
pub use upload::UploadRepository;
