//! Signed recovery tokens embedded in reset links.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use permit_core::config::AuthConfig;
use permit_core::error::AppError;
use permit_core::types::PrincipalId;
use permit_entity::Principal;

/// Claims carried by a recovery token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryClaims {
    /// Subject: the principal being recovered.
    pub sub: PrincipalId,
    /// Email the link was sent to.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id.
    pub jti: Uuid,
}

/// Issues and verifies recovery tokens (HS256).
#[derive(Clone)]
pub struct RecoveryTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

impl std::fmt::Debug for RecoveryTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryTokenCodec")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl RecoveryTokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(config.recovery_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.recovery_secret.as_bytes()),
            validation,
            ttl_minutes: config.recovery_ttl_minutes as i64,
        }
    }

    /// Issue a token for the principal, valid for the configured TTL.
    pub fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        self.issue_at(principal, Utc::now())
    }

    fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = RecoveryClaims {
            sub: principal.id,
            email: principal.email.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.ttl_minutes)).timestamp(),
            jti: Uuid::new_v4(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode recovery token: {e}")))
    }

    /// Verify a token. Expired tokens are [`AuthExpired`], anything else
    /// unreadable is [`InvalidLink`].
    ///
    /// [`AuthExpired`]: permit_core::ErrorKind::AuthExpired
    /// [`InvalidLink`]: permit_core::ErrorKind::InvalidLink
    pub fn verify(&self, token: &str) -> Result<RecoveryClaims, AppError> {
        decode::<RecoveryClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::auth_expired("Password reset link has expired")
                }
                _ => AppError::invalid_link(format!("Invalid password reset link: {e}")),
            })
    }
}
