//! Auth-state change events.

use serde::{Deserialize, Serialize};

use crate::types::PrincipalId;

/// Change in the current auth session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    /// A principal signed in with a password.
    SignedIn {
        /// The principal that now owns the session.
        principal_id: PrincipalId,
    },
    /// The current session ended.
    SignedOut,
    /// A recovery token was exchanged for a session.
    PasswordRecovery {
        /// The principal being recovered.
        principal_id: PrincipalId,
    },
    /// The current principal's credentials changed.
    UserUpdated {
        /// The updated principal.
        principal_id: PrincipalId,
    },
}

impl AuthEvent {
    /// The principal this event establishes a session for, if any.
    pub fn session_principal(&self) -> Option<PrincipalId> {
        match self {
            Self::SignedIn { principal_id } | Self::PasswordRecovery { principal_id } => {
                Some(*principal_id)
            }
            Self::SignedOut | Self::UserUpdated { .. } => None,
        }
    }
}
