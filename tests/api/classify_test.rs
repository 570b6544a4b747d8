//! Coverage for backend failure classification.

use aerodesk::api::{classify, ApiError, ApiFailure};

fn status(status: u16, body: &str) -> ApiError {
    ApiError::Status {
        status,
        body: body.to_owned(),
    }
}

#[test]
fn errors_object_becomes_field_errors() {
    let error = status(
        400,
        r#"{"errors":{"codeIATA":"must match \"^[A-Z0-9]{2}$\"","name":"must not be blank"}}"#,
    );
    match classify(&error) {
        ApiFailure::FieldErrors(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.contains_key("codeIATA"));
            assert_eq!(errors.get("name").map(String::as_str), Some("must not be blank"));
        }
        other => panic!("expected FieldErrors, got {other:?}"),
    }
}

#[test]
fn field_errors_key_is_also_recognized() {
    let error = status(400, r#"{"fieldErrors":{"email":"already registered"}}"#);
    assert!(matches!(classify(&error), ApiFailure::FieldErrors(_)));
}

#[test]
fn empty_errors_object_falls_through_to_message() {
    let error = status(400, r#"{"errors":{},"message":"Validation failed"}"#);
    assert_eq!(
        classify(&error),
        ApiFailure::Message("Validation failed".to_owned())
    );
}

#[test]
fn message_and_error_keys_become_message() {
    let with_message = status(409, r#"{"message":"IATA code already exists"}"#);
    assert_eq!(
        classify(&with_message),
        ApiFailure::Message("IATA code already exists".to_owned())
    );

    let with_error = status(500, r#"{"error":"Internal Server Error"}"#);
    assert_eq!(
        classify(&with_error),
        ApiFailure::Message("Internal Server Error".to_owned())
    );
}

#[test]
fn unparseable_bodies_are_unknown() {
    assert_eq!(classify(&status(502, "<html>Bad Gateway</html>")), ApiFailure::Unknown);
    assert_eq!(classify(&status(500, "")), ApiFailure::Unknown);
    assert_eq!(classify(&status(400, r#"{"unrelated":true}"#)), ApiFailure::Unknown);
}

#[test]
fn non_status_errors_are_unknown() {
    assert_eq!(classify(&ApiError::SessionExpired), ApiFailure::Unknown);
    assert_eq!(classify(&ApiError::Aborted), ApiFailure::Unknown);
}

#[test]
fn not_found_helper_only_matches_404() {
    assert!(status(404, "").is_not_found());
    assert!(!status(403, "").is_not_found());
    assert!(!ApiError::SessionExpired.is_not_found());
}
