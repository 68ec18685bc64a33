//! Parsing of the URL fragment a recovery link lands with.

use percent_encoding::percent_decode_str;

/// What the reset page found in its URL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryFragment {
    /// A recovery token to exchange for a session.
    Token(String),
    /// The auth subsystem redirected with an error.
    Error(String),
    /// Nothing recovery-related; the token may still arrive by event.
    Empty,
}

impl RecoveryFragment {
    /// Parse `#access_token=..&type=recovery` or `#error=..&error_description=..`.
    pub fn parse(fragment: &str) -> Self {
        let mut access_token = None;
        let mut token_type = None;
        let mut error = None;
        let mut error_description = None;

        for pair in fragment.trim_start_matches('#').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode(value);
            match key {
                "access_token" => access_token = Some(value),
                "type" => token_type = Some(value),
                "error" => error = Some(value),
                "error_description" => error_description = Some(value),
                _ => {}
            }
        }

        if error.is_some() || error_description.is_some() {
            return Self::Error(
                error_description
                    .or(error)
                    .unwrap_or_else(|| "Invalid link".to_string()),
            );
        }

        match (access_token, token_type.as_deref()) {
            (Some(token), Some("recovery")) if !token.is_empty() => Self::Token(token),
            _ => Self::Empty,
        }
    }
}

fn decode(value: &str) -> String {
    percent_decode_str(&value.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
