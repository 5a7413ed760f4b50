//! Authorisation state established by the registration scenario.

use std::fmt;

use thiserror::Error;

use super::context::{ScenarioContext, keys};

/// Reasons a session could not be built from registration output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The access token was absent, not a string, or blank.
    #[error("registration did not yield a non-empty access token")]
    MissingToken,
    /// The user identifier was absent or not an integer.
    #[error("registration did not yield an integer user id")]
    MissingUserId,
}

/// Bearer token and user id shared by every authorised scenario.
///
/// Built once per suite run and read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: i64,
}

impl Session {
    /// Creates a session, rejecting blank tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingToken`] when `token` is blank.
    pub fn new(token: impl Into<String>, user_id: i64) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        Ok(Self { token, user_id })
    }

    /// Reads the captured token and user id from a registration context.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when either capture is missing or mistyped.
    pub fn from_context(ctx: &ScenarioContext) -> Result<Self, SessionError> {
        let token = ctx
            .get(keys::ACCESS_TOKEN)
            .and_then(|value| value.as_str())
            .ok_or(SessionError::MissingToken)?;
        let user_id = ctx
            .get(keys::USER_ID)
            .and_then(|value| value.as_i64())
            .ok_or(SessionError::MissingUserId)?;
        Self::new(token, user_id)
    }

    /// The registered user's id.
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Seeds a context with the session's token, header value, and user id.
    pub fn context(&self) -> ScenarioContext {
        ScenarioContext::new()
            .with(keys::ACCESS_TOKEN, self.token.as_str())
            .with(keys::AUTHORIZATION, self.authorization())
            .with(keys::USER_ID, self.user_id)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}
