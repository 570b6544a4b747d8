//! Guarded data fetch shared by every screen.
//!
//! Each screen runs the same state machine on entry:
//!
//! ```text
//! Initializing -> CheckingAuth -> (Redirecting | LoadingData)
//!                                  LoadingData -> (Ready | NotFound | Error)
//! ```
//!
//! [`guarded_fetch`] is that machine, written once: it re-derives the
//! session from storage, applies the role gate, runs the screen's fetch
//! raced against Ctrl-C, and normalizes failure for display. Nothing is
//! cached between runs; every navigation starts from `Initializing`.

use std::future::Future;

use tracing::debug;

use crate::api::{classify, AbortSignal, ApiError, ApiFailure};
use crate::session::{Role, Session, TokenStore};

/// Where the guard sends a caller that may not stay on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Not authenticated (or the session expired mid-fetch).
    Login,
    /// Authenticated, but the role does not permit this screen.
    Home,
}

/// States of the per-screen machine, logged as transitions happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    Initializing,
    CheckingAuth,
    Redirecting,
    LoadingData,
    Ready,
    NotFound,
    Error,
}

fn transition(screen: &str, state: GuardState) {
    debug!(screen, state = ?state, "guard transition");
}

/// Result of a guarded fetch.
#[derive(Debug)]
pub enum PageOutcome<T> {
    /// Fetch succeeded; the screen renders this data.
    Ready(T),
    /// The caller must leave the screen.
    Redirect(Redirect),
    /// The backend has no such record.
    NotFound,
    /// Fetch failed; display the normalized failure and stop loading.
    Failed(ApiFailure),
    /// The user abandoned the fetch (Ctrl-C mid-request).
    Aborted,
}

/// Run one guarded fetch for `screen`.
///
/// `allowed` lists the roles permitted on the screen; an authenticated
/// session whose role is missing or not listed is redirected to a
/// role-appropriate default instead of seeing an error. The fetch
/// receives an [`AbortSignal`] already wired to Ctrl-C and must pass it
/// to the client (see [`crate::api::ApiClient::with_abort`]).
pub async fn guarded_fetch<T, Fut, F>(
    screen: &str,
    store: &TokenStore,
    allowed: &[Role],
    fetch: F,
) -> PageOutcome<T>
where
    F: FnOnce(AbortSignal) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    transition(screen, GuardState::Initializing);

    transition(screen, GuardState::CheckingAuth);
    let session = Session::read(store);
    if !session.authenticated {
        transition(screen, GuardState::Redirecting);
        return PageOutcome::Redirect(Redirect::Login);
    }
    let permitted = session.role.is_some_and(|role| allowed.contains(&role));
    if !permitted {
        transition(screen, GuardState::Redirecting);
        return PageOutcome::Redirect(Redirect::Home);
    }

    transition(screen, GuardState::LoadingData);
    let signal = AbortSignal::new();
    let fetched = tokio::select! {
        result = fetch(signal.clone()) => result,
        _ = tokio::signal::ctrl_c() => {
            signal.abort();
            debug!(screen, "fetch abandoned by user");
            return PageOutcome::Aborted;
        }
    };

    match fetched {
        Ok(data) => {
            transition(screen, GuardState::Ready);
            PageOutcome::Ready(data)
        }
        Err(ApiError::SessionExpired) => {
            transition(screen, GuardState::Redirecting);
            PageOutcome::Redirect(Redirect::Login)
        }
        Err(ApiError::Aborted) => PageOutcome::Aborted,
        Err(e) if e.is_not_found() => {
            transition(screen, GuardState::NotFound);
            PageOutcome::NotFound
        }
        Err(e) => {
            transition(screen, GuardState::Error);
            debug!(screen, error = %e, "guarded fetch failed");
            PageOutcome::Failed(classify(&e))
        }
    }
}
