//! # permit-auth
//!
//! Identity and access for the permit portal.
//!
//! ## Modules
//!
//! - `provider`: the auth boundary trait and an in-process implementation
//! - `password`: Argon2id hashing and registration/reset password policy
//! - `provisioner`: principal + profile creation with retry-on-race
//! - `session`: fresh per-call principal and profile resolution
//! - `gate`: route access decisions by session and role
//! - `recovery`: recovery tokens, link parsing, bounded wait, reset flow

pub mod gate;
pub mod password;
pub mod provider;
pub mod provisioner;
pub mod recovery;
pub mod session;

pub use gate::{AccessGate, GateAction, GateOutcome, GateState};
pub use password::{PasswordHasher, PasswordValidator};
pub use provider::{AuthProvider, LocalAuthProvider, RecoveryLink};
pub use provisioner::{IdentityProvisioner, RegistrationForm};
pub use recovery::{PasswordResetFlow, RecoveryState, RecoveryWaiter};
pub use session::{Actor, SessionResolver};
