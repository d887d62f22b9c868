use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::error::{auth::AuthError, Error};

/// Header set by the bot gateway carrying the caller's Discord user ID
pub static CALLER_HEADER: &str = "x-discord-user-id";

/// The Discord user on whose behalf a request is made.
///
/// The gateway in front of this service authenticates the caller and forwards their Discord
/// ID; requests without a well-formed ID are rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    /// Validates a raw header value as a Discord snowflake
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let id = raw.trim();

        if id.is_empty() {
            return Err(AuthError::MissingCallerIdentity);
        }
        if !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(AuthError::MalformedCallerIdentity);
        }

        Ok(Self(id.to_string()))
    }

    pub fn discord_id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or(AuthError::MissingCallerIdentity)?;
        let raw = value
            .to_str()
            .map_err(|_| AuthError::MalformedCallerIdentity)?;

        Ok(Self::parse(raw)?)
    }
}
