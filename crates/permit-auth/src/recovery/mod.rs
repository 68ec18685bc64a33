//! Password recovery: signed tokens, link parsing, the bounded wait for a
//! token to materialize, and the reset flow built on top.

pub mod flow;
pub mod fragment;
pub mod token;
pub mod waiter;

pub use flow::PasswordResetFlow;
pub use fragment::RecoveryFragment;
pub use token::{RecoveryClaims, RecoveryTokenCodec};
pub use waiter::{RecoveryStage, RecoveryState, RecoveryWaiter};
