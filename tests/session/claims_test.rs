//! Coverage for token decoding and session derivation.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;

use aerodesk::session::claims::{
    decode_claims, is_authenticated, user_role, username,
};
use aerodesk::session::{Role, Session, TokenStore};

fn token_with_payload(payload: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    format!("header.{encoded}.signature")
}

fn future_exp() -> i64 {
    Utc::now().timestamp().saturating_add(3600)
}

#[test]
fn decodes_url_safe_payload() {
    let token = token_with_payload(r#"{"sub":"amy@example.com","role":"ROLE_ADMIN","exp":123}"#);
    let claims = decode_claims(&token).expect("claims should decode");
    assert_eq!(claims.sub.as_deref(), Some("amy@example.com"));
    assert_eq!(claims.role.as_deref(), Some("ROLE_ADMIN"));
    assert_eq!(claims.exp, Some(123));
}

#[test]
fn decodes_standard_base64_payload() {
    // Some issuers emit standard base64 with padding in the middle segment.
    let encoded = STANDARD.encode(r#"{"sub":"bob@example.com"}"#);
    let token = format!("h.{encoded}.s");
    let claims = decode_claims(&token).expect("claims should decode");
    assert_eq!(claims.sub.as_deref(), Some("bob@example.com"));
}

#[test]
fn rejects_tokens_without_three_segments() {
    assert!(decode_claims("only-one-part").is_none());
    assert!(decode_claims("two.parts").is_none());
    assert!(decode_claims("").is_none());
}

#[test]
fn rejects_garbage_payloads() {
    assert!(decode_claims("h.!!!not-base64!!!.s").is_none());
    let not_json = URL_SAFE_NO_PAD.encode("just some text");
    assert!(decode_claims(&format!("h.{not_json}.s")).is_none());
}

#[test]
fn expired_token_is_not_authenticated() {
    let past = Utc::now().timestamp().saturating_sub(3600);
    let token = token_with_payload(&format!(r#"{{"exp":{past}}}"#));
    assert!(!is_authenticated(Some(&token)));
}

#[test]
fn missing_exp_is_not_authenticated() {
    let token = token_with_payload(r#"{"role":"ROLE_ADMIN"}"#);
    assert!(!is_authenticated(Some(&token)));
    assert!(!is_authenticated(None));
}

#[test]
fn role_prefix_is_stripped_exactly_once() {
    let exp = future_exp();
    let admin = token_with_payload(&format!(r#"{{"role":"ROLE_ADMIN","exp":{exp}}}"#));
    assert_eq!(user_role(Some(&admin)), Some(Role::Admin));

    let doubled = token_with_payload(&format!(r#"{{"role":"ROLE_ROLE_ADMIN","exp":{exp}}}"#));
    assert_eq!(user_role(Some(&doubled)), None);

    let bare = token_with_payload(&format!(r#"{{"role":"USER","exp":{exp}}}"#));
    assert_eq!(user_role(Some(&bare)), Some(Role::User));
}

#[test]
fn username_comes_from_sub() {
    let token = token_with_payload(r#"{"sub":"carol@example.com"}"#);
    assert_eq!(username(Some(&token)).as_deref(), Some("carol@example.com"));
    assert_eq!(username(None), None);
}

#[test]
fn session_is_rederived_from_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("token"));

    let before = Session::read(&store);
    assert!(!before.authenticated);
    assert_eq!(before.role, None);

    let exp = future_exp();
    let token = token_with_payload(&format!(
        r#"{{"sub":"dana@example.com","role":"ROLE_USER","exp":{exp}}}"#
    ));
    store.save(&token).expect("token saved");

    // Same store handle, fresh read: the new token is visible at once.
    let after = Session::read(&store);
    assert!(after.authenticated);
    assert_eq!(after.role, Some(Role::User));
    assert_eq!(after.username.as_deref(), Some("dana@example.com"));

    store.clear().expect("token cleared");
    let cleared = Session::read(&store);
    assert!(!cleared.authenticated);
}
