//! Wire-level client tests against a loopback socket.
//!
//! Each test stands up a one-shot TCP listener, drives a real request
//! through a service, and inspects the raw bytes the client put on the
//! wire. No backend is involved.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use aerodesk::api::airlines::AirlineService;
use aerodesk::api::auth::{AuthError, AuthService};
use aerodesk::api::{ApiClient, ApiError};
use aerodesk::session::TokenStore;

const EMPTY_PAGE: &str = r#"{"content":[],"totalElements":0,"totalPages":0,"size":10,"number":0}"#;

/// Serve exactly one request, answering with `status` and `body`.
///
/// Returns the base URL to point a client at and a channel delivering
/// the raw request head (request line plus headers) once it arrives.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0_u8; 1024];
        let head_end = loop {
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
            let n = stream.read(&mut buf).expect("read head");
            if n == 0 {
                break raw.len();
            }
            raw.extend_from_slice(&buf[..n]);
        };
        let head = String::from_utf8_lossy(&raw[..head_end]).to_string();

        // Drain any request body so the client never sees a reset
        // before it has finished writing.
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let mut seen = raw.len().saturating_sub(head_end.saturating_add(4));
        while seen < content_length {
            let n = stream.read(&mut buf).expect("read body");
            if n == 0 {
                break;
            }
            seen = seen.saturating_add(n);
        }

        let response = format!(
            "HTTP/1.1 {status} Status\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        tx.send(head).expect("deliver head");
    });
    (format!("http://{addr}"), rx)
}

fn store_at(dir: &tempfile::TempDir) -> TokenStore {
    TokenStore::new(dir.path().join("token"))
}

#[tokio::test]
async fn bearer_header_attached_when_a_token_is_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_at(&dir);
    store.save("tok-123").expect("save token");
    let (base, head) = serve_once(200, EMPTY_PAGE);
    let client = ApiClient::new(&base, store).expect("client");

    AirlineService::new(&client).list(0, 10).await.expect("listing");

    let head = head.recv().expect("request head").to_ascii_lowercase();
    assert!(
        head.contains("authorization: bearer tok-123"),
        "missing bearer header in:\n{head}"
    );
}

#[tokio::test]
async fn bearer_header_omitted_without_a_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (base, head) = serve_once(200, EMPTY_PAGE);
    let client = ApiClient::new(&base, store_at(&dir)).expect("client");

    AirlineService::new(&client).list(0, 10).await.expect("listing");

    let head = head.recv().expect("request head").to_ascii_lowercase();
    assert!(
        !head.contains("authorization"),
        "unexpected auth header in:\n{head}"
    );
}

#[tokio::test]
async fn unauthorized_response_clears_the_token_and_expires_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_at(&dir);
    store.save("stale").expect("save token");
    let (base, _head) = serve_once(401, r#"{"message":"Unauthorized"}"#);
    let client = ApiClient::new(&base, store).expect("client");

    let error = AirlineService::new(&client)
        .list(0, 10)
        .await
        .expect_err("401 must fail the call");

    assert!(matches!(error, ApiError::SessionExpired));
    assert!(
        client.store().read().is_none(),
        "token must be cleared after a 401"
    );
}

#[tokio::test]
async fn unauthorized_login_keeps_the_token_and_reports_the_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_at(&dir);
    store.save("still-valid").expect("save token");
    let (base, _head) = serve_once(401, r#"{"message":"Bad credentials"}"#);
    let client = ApiClient::new(&base, store).expect("client");

    let error = AuthService::new(&client)
        .login("amy@example.com", "wrong")
        .await
        .expect_err("login must fail");

    let AuthError::Rejected(message) = error else {
        panic!("expected a rejection, got {error:?}");
    };
    assert_eq!(message, "Bad credentials");
    assert_eq!(client.store().read().as_deref(), Some("still-valid"));
}
