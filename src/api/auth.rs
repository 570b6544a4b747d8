//! Authentication service: register, login, logout.
//!
//! Login is the backend's one odd endpoint: credentials go out as query
//! parameters and the raw response body is the bearer token itself, not
//! JSON. The token is persisted through the client's [`TokenStore`]
//! before the call returns.

use serde::Serialize;
use tracing::info;

use super::{ApiClient, ApiError};

/// Fallback message when a register failure carries no usable body.
const REGISTER_FALLBACK: &str = "Registration failed";

/// Fallback message when a login failure carries no usable body.
const LOGIN_FALLBACK: &str = "Invalid email or password";

/// Registration request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email; doubles as the login name.
    pub email: String,
    /// Password, sent once over HTTPS and never stored locally.
    pub password: String,
}

impl std::fmt::Display for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} <{}>", self.first_name, self.last_name, self.email)
    }
}

/// Errors from the auth endpoints, already carrying a display message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the request; `0` is the best-effort message
    /// extracted from the response body.
    #[error("{0}")]
    Rejected(String),
    /// Anything below the HTTP conversation (transport, token storage).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Typed operations on `/auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Service over the shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a new account; returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with a best-effort message on any
    /// backend refusal (duplicate email, weak password).
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let body = serde_json::to_value(request)
            .map_err(|e| AuthError::Other(anyhow::anyhow!("failed to encode request: {e}")))?;
        match self.client.post_public("auth/register", &[], Some(&body)).await {
            Ok(confirmation) => {
                info!(email = %request.email, "account registered");
                Ok(confirmation)
            }
            Err(e) => Err(AuthError::Rejected(extract_message(&e, REGISTER_FALLBACK))),
        }
    }

    /// Log in and persist the returned bearer token.
    ///
    /// Credentials travel as query parameters; the response body is the
    /// raw token string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with a best-effort message when
    /// the backend refuses or returns an empty body, and
    /// [`AuthError::Other`] when the token cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let query = [
            ("email", email.to_owned()),
            ("password", password.to_owned()),
        ];
        let token = match self.client.post_public("auth/login", &query, None).await {
            Ok(token) => token,
            Err(e) => return Err(AuthError::Rejected(extract_message(&e, LOGIN_FALLBACK))),
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Rejected(
                "No token received from server".to_owned(),
            ));
        }

        self.client.store().save(token)?;
        info!(email, "signed in");
        Ok(())
    }

    /// Log out: clear the stored token. Purely local, no backend call.
    ///
    /// # Errors
    ///
    /// Returns an error when the token file cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.client.store().clear()?;
        info!("signed out");
        Ok(())
    }
}

/// Best-effort display message for a failed auth call.
///
/// Reads `message` or `error` from a JSON body when present, otherwise
/// falls back.
fn extract_message(error: &ApiError, fallback: &str) -> String {
    let ApiError::Status { body, .. } = error else {
        return fallback.to_owned();
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback.to_owned();
    };
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| fallback.to_owned())
}
