//! Bearer-token claim decoding.
//!
//! The backend issues a three-segment compact token. The middle segment is
//! base64-encoded JSON carrying at least `role` and `exp` claims. Nothing
//! here verifies the signature; the backend does that on every request,
//! the client only needs the claims to gate screens and render the header.
//!
//! Every read fails closed: a missing, malformed, or expired token is
//! simply "no session", never an error surfaced to the caller.

use base64::Engine;
use serde::Deserialize;

use super::store::TokenStore;

/// The role claim of an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full access: airlines and passengers management included.
    Admin,
    /// Regular user: flights and own bookings only.
    User,
}

impl Role {
    /// Parse a raw `role` claim value.
    ///
    /// Strips exactly one leading `ROLE_` prefix, so `"ROLE_ADMIN"` and
    /// `"ADMIN"` both map to [`Role::Admin`]. Unknown values map to `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let stripped = raw.strip_prefix("ROLE_").unwrap_or(raw);
        match stripped {
            "ADMIN" => Some(Self::Admin),
            "USER" => Some(Self::User),
            _ => None,
        }
    }

    /// Display name used by the shell header and menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Claims decoded from the token payload. Unknown claims are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since epoch.
    pub exp: Option<i64>,
    /// Role claim, possibly `ROLE_`-prefixed.
    pub role: Option<String>,
    /// Subject claim, the username.
    pub sub: Option<String>,
}

/// Decode the middle segment of a compact token without verifying it.
///
/// Returns `None` for anything that is not three dot-separated segments
/// with a base64 JSON object in the middle.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    segments.next()?;

    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

/// Tokens are usually base64url without padding, but some issuers pad or
/// use the standard alphabet.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| base64::engine::general_purpose::STANDARD.decode(segment))
        .ok()
}

/// Whether the token represents a live session.
///
/// True only when the claims decode and `exp` (seconds, scaled to millis)
/// is still in the future. A missing `exp` counts as expired.
pub fn is_authenticated(token: Option<&str>) -> bool {
    let Some(claims) = token.and_then(decode_claims) else {
        return false;
    };
    let expires_at_millis = claims.exp.unwrap_or(0).saturating_mul(1000);
    chrono::Utc::now().timestamp_millis() < expires_at_millis
}

/// The role claim of the token, if it decodes to a known role.
pub fn user_role(token: Option<&str>) -> Option<Role> {
    token
        .and_then(decode_claims)
        .and_then(|claims| claims.role.as_deref().and_then(Role::parse))
}

/// The `sub` claim of the token, the signed-in username.
pub fn username(token: Option<&str>) -> Option<String> {
    token.and_then(decode_claims).and_then(|claims| claims.sub)
}

/// A point-in-time view of the stored session.
///
/// Derived from storage on every read; never cached. Screens re-read it on
/// each navigation so a token expiring mid-session is noticed at the next
/// guard check.
#[derive(Debug, Clone)]
pub struct Session {
    /// Whether the stored token is present and unexpired.
    pub authenticated: bool,
    /// Decoded role, when authenticated with a known role claim.
    pub role: Option<Role>,
    /// Decoded username, when the token carries a `sub` claim.
    pub username: Option<String>,
}

impl Session {
    /// Derive the current session from the token store.
    pub fn read(store: &TokenStore) -> Self {
        let token = store.read();
        let token = token.as_deref();
        let authenticated = is_authenticated(token);
        Self {
            authenticated,
            role: if authenticated { user_role(token) } else { None },
            username: if authenticated { username(token) } else { None },
        }
    }
}
