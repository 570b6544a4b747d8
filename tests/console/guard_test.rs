//! Coverage for the screen guard against real token files.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;

use aerodesk::api::ApiError;
use aerodesk::console::guard::{guarded_fetch, PageOutcome, Redirect};
use aerodesk::session::{Role, TokenStore};

fn store_with_token(payload: &str) -> (tempfile::TempDir, TokenStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("token"));
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    store.save(&format!("h.{encoded}.s")).expect("token saved");
    (dir, store)
}

fn admin_store() -> (tempfile::TempDir, TokenStore) {
    let exp = Utc::now().timestamp().saturating_add(3600);
    store_with_token(&format!(r#"{{"role":"ROLE_ADMIN","exp":{exp}}}"#))
}

#[tokio::test]
async fn expired_token_never_reaches_the_fetch() {
    let past = Utc::now().timestamp().saturating_sub(60);
    let (_dir, store) = store_with_token(&format!(r#"{{"role":"ROLE_ADMIN","exp":{past}}}"#));

    let outcome: PageOutcome<()> = guarded_fetch("test", &store, &[Role::Admin], |_| async {
        panic!("fetch must not run for an expired session")
    })
    .await;
    assert!(matches!(outcome, PageOutcome::Redirect(Redirect::Login)));
}

#[tokio::test]
async fn role_gate_applies_after_auth() {
    let exp = Utc::now().timestamp().saturating_add(3600);
    let (_dir, store) = store_with_token(&format!(r#"{{"role":"ROLE_USER","exp":{exp}}}"#));

    let outcome: PageOutcome<()> = guarded_fetch("test", &store, &[Role::Admin], |_| async {
        panic!("fetch must not run for a disallowed role")
    })
    .await;
    assert!(matches!(outcome, PageOutcome::Redirect(Redirect::Home)));
}

#[tokio::test]
async fn successful_fetch_delivers_data() {
    let (_dir, store) = admin_store();
    let outcome = guarded_fetch("test", &store, &[Role::Admin], |_| async {
        Ok(vec!["TK1923", "TK1924"])
    })
    .await;
    match outcome {
        PageOutcome::Ready(flights) => assert_eq!(flights.len(), 2),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[tokio::test]
async fn mid_fetch_expiry_redirects_and_aborts_stay_local() {
    let (_dir, store) = admin_store();

    let expired: PageOutcome<()> = guarded_fetch("test", &store, &[Role::Admin], |_| async {
        Err(ApiError::SessionExpired)
    })
    .await;
    assert!(matches!(expired, PageOutcome::Redirect(Redirect::Login)));

    let aborted: PageOutcome<()> = guarded_fetch("test", &store, &[Role::Admin], |_| async {
        Err(ApiError::Aborted)
    })
    .await;
    assert!(matches!(aborted, PageOutcome::Aborted));
}
