//! Principal and profile entities.

pub mod model;
pub mod role;

pub use model::{Principal, Profile, ProfileFields};
pub use role::Role;
