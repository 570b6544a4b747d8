//! HTTP access to the booking backend.
//!
//! [`ApiClient`] is the sole network egress point. It owns the two
//! cross-cutting behaviors every resource service relies on:
//!
//! - the bearer token from the [`TokenStore`] is attached to every
//!   authenticated request, when present;
//! - a `401` on an authenticated request clears the store and surfaces
//!   [`ApiError::SessionExpired`] exactly once, which the shell treats as
//!   a forced trip back to the login screen. Login and register go out as
//!   [`Auth::Public`] and keep their `401`s, mirroring "no redirect while
//!   already on the login route".
//!
//! Resource services ([`airlines`], [`flights`], [`passengers`],
//! [`bookings`], [`auth`]) are typed wrappers over this client and never
//! talk to the backend directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tracing::{debug, warn};
use url::Url;

use crate::session::TokenStore;
use crate::validate::FieldErrors;

pub mod airlines;
pub mod auth;
pub mod bookings;
pub mod flights;
pub mod passengers;

/// Errors returned by the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport failure (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Backend responded with a non-2xx status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for [`classify`].
        body: String,
    },
    /// Response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(String),
    /// A `401` arrived on an authenticated request; the token is already
    /// cleared and the caller must re-authenticate.
    #[error("session expired, please sign in again")]
    SessionExpired,
    /// The request was abandoned via its [`AbortSignal`].
    #[error("request aborted")]
    Aborted,
    /// The configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Whether this error is a 404 from the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// A backend failure normalized into the shapes screens care about.
///
/// Produced only by [`classify`] at the API boundary; screens never poke
/// at raw response JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Structured per-field validation errors, rendered inline.
    FieldErrors(FieldErrors),
    /// A single human-readable message, routed through the error mapper.
    Message(String),
    /// Transport failure or unrecognized payload.
    Unknown,
}

/// Normalize an [`ApiError`] into an [`ApiFailure`].
///
/// Recognizes the backend's two structured error payloads: an `errors` or
/// `fieldErrors` object (field name to message) and a `message`/`error`
/// string. Everything else degrades to [`ApiFailure::Unknown`].
pub fn classify(error: &ApiError) -> ApiFailure {
    let ApiError::Status { body, .. } = error else {
        return ApiFailure::Unknown;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiFailure::Unknown;
    };

    let field_map = value.get("errors").or_else(|| value.get("fieldErrors"));
    if let Some(serde_json::Value::Object(map)) = field_map {
        if !map.is_empty() {
            let errors = map
                .iter()
                .map(|(field, msg)| {
                    let text = msg
                        .as_str()
                        .map(str::to_owned)
                        .unwrap_or_else(|| msg.to_string());
                    (field.clone(), text)
                })
                .collect();
            return ApiFailure::FieldErrors(errors);
        }
    }

    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return ApiFailure::Message(message.to_owned());
    }
    if let Some(message) = value.get("error").and_then(|m| m.as_str()) {
        return ApiFailure::Message(message.to_owned());
    }

    ApiFailure::Unknown
}

/// One page of a list response, as the backend wraps it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The records on this page.
    pub content: Vec<T>,
    /// Total records across all pages.
    pub total_elements: i64,
    /// Total page count.
    pub total_pages: i64,
    /// Requested page size.
    pub size: i64,
    /// Zero-based page index.
    pub number: i64,
}

/// Abort signal raced against an in-flight request.
///
/// A screen abandoned mid-fetch fires its signal so the response is
/// dropped instead of being applied stale. Fire-once; aborting twice is
/// harmless.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    inner: Arc<AbortInner>,
}

#[derive(Debug, Default)]
struct AbortInner {
    fired: AtomicBool,
    notify: Notify,
}

impl AbortSignal {
    /// A fresh, unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal; any request racing against it returns
    /// [`ApiError::Aborted`].
    pub fn abort(&self) {
        self.inner.fired.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Whether the signal has fired.
    pub fn is_aborted(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }

    /// Resolve once the signal fires. Resolves immediately when it
    /// already has.
    pub async fn aborted(&self) {
        // Register interest before re-checking the flag, so an abort
        // between the check and the await is not missed.
        loop {
            if self.is_aborted() {
                return;
            }
            let notified = self.inner.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Attach the token when present; treat `401` as session expiry.
    Bearer,
    /// No token; `401` stays a plain status error (login, register).
    Public,
}

/// Shared HTTP client for the booking backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: TokenStore,
    abort: Option<AbortSignal>,
}

impl ApiClient {
    /// Build a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BaseUrl`] when the URL does not parse.
    pub fn new(base_url: &str, store: TokenStore) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|e| ApiError::BaseUrl(format!("{trimmed}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            abort: None,
        })
    }

    /// A clone of this client whose requests race against `signal`.
    pub fn with_abort(&self, signal: AbortSignal) -> Self {
        let mut scoped = self.clone();
        scoped.abort = Some(signal);
        scoped
    }

    /// The token store backing this client.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Resolve a relative endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        // A path-less base URL renders with a trailing slash; trim the
        // rendered form so every configured shape joins cleanly.
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| ApiError::BaseUrl(format!("{joined}: {e}")))
    }

    /// Send a request, applying auth policy and the abort signal.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        auth: Auth,
    ) -> Result<reqwest::Response, ApiError> {
        let request = match auth {
            Auth::Bearer => match self.store.read() {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            Auth::Public => request,
        };

        let send = request.send();
        let response = match &self.abort {
            Some(signal) => tokio::select! {
                result = send => result?,
                () = signal.aborted() => return Err(ApiError::Aborted),
            },
            None => send.await?,
        };

        if auth == Auth::Bearer && response.status() == StatusCode::UNAUTHORIZED {
            // Clear first so a concurrent retry sees "no token" rather
            // than triggering a second expiry round.
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear token after 401");
            }
            debug!("401 on authenticated request, session closed");
            return Err(ApiError::SessionExpired);
        }

        Ok(response)
    }

    /// Read the body, mapping non-2xx statuses to [`ApiError::Status`].
    async fn check(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.http.get(self.endpoint(path)?).query(query);
        let body = Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Self::parse(&body)
    }

    /// POST a JSON body, expect a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.endpoint(path)?).json(body);
        let text = Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Self::parse(&text)
    }

    /// PUT a JSON body, expect a JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.put(self.endpoint(path)?).json(body);
        let text = Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Self::parse(&text)
    }

    /// POST with no body, ignore the response body.
    pub(crate) async fn post_empty(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), ApiError> {
        let request = self.http.post(self.endpoint(path)?).query(query);
        Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Ok(())
    }

    /// PATCH with query parameters only.
    pub(crate) async fn patch_empty(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), ApiError> {
        let request = self.http.patch(self.endpoint(path)?).query(query);
        Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Ok(())
    }

    /// DELETE a resource.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.http.delete(self.endpoint(path)?);
        Self::check(self.execute(request, Auth::Bearer).await?).await?;
        Ok(())
    }

    /// POST without the bearer token; the raw body text comes back for
    /// the caller to interpret (login returns a bare token string).
    pub(crate) async fn post_public(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<String, ApiError> {
        let mut request = self.http.post(self.endpoint(path)?).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::check(self.execute(request, Auth::Public).await?).await
    }
}
