//! Coverage for client-side form validation.

use aerodesk::api::airlines::AirlineDraft;
use aerodesk::api::auth::RegisterRequest;
use aerodesk::validate::{airline, email_shape, is_overbooked, registration};

fn valid_airline() -> AirlineDraft {
    AirlineDraft {
        code_iata: "TK".to_owned(),
        code_icao: "THY".to_owned(),
        name: "Turkish Airlines".to_owned(),
        country: "Turkey".to_owned(),
        fleet_size: "350".to_owned(),
    }
}

#[test]
fn valid_airline_passes() {
    assert!(airline(&valid_airline()).is_empty());
}

#[test]
fn iata_code_must_be_two_uppercase_chars() {
    let mut draft = valid_airline();
    draft.code_iata = "tk1".to_owned();
    let errors = airline(&draft);
    assert!(errors.contains_key("codeIATA"));

    draft.code_iata = "T".to_owned();
    assert!(airline(&draft).contains_key("codeIATA"));

    draft.code_iata = "U2".to_owned();
    assert!(!airline(&draft).contains_key("codeIATA"));
}

#[test]
fn icao_code_must_be_three_uppercase_chars() {
    let mut draft = valid_airline();
    draft.code_icao = "TH".to_owned();
    assert!(airline(&draft).contains_key("codeICAO"));

    draft.code_icao = "TH9".to_owned();
    assert!(!airline(&draft).contains_key("codeICAO"));
}

#[test]
fn country_allows_punctuation_within_bounds() {
    let mut draft = valid_airline();
    draft.country = "Cote d'Ivoire (West Africa)".to_owned();
    assert!(airline(&draft).is_empty());

    draft.country = "X".to_owned();
    assert!(airline(&draft).contains_key("country"));

    draft.country = "Country42".to_owned();
    assert!(airline(&draft).contains_key("country"));
}

#[test]
fn fleet_size_must_be_digits() {
    let mut draft = valid_airline();
    draft.fleet_size = "many".to_owned();
    assert!(airline(&draft).contains_key("fleetSize"));

    draft.fleet_size = "0".to_owned();
    assert!(!airline(&draft).contains_key("fleetSize"));
}

#[test]
fn registration_requires_every_field() {
    let empty = RegisterRequest::default();
    let errors = registration(&empty);
    assert!(errors.contains_key("firstName"));
    assert!(errors.contains_key("lastName"));
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("password"));

    let complete = RegisterRequest {
        first_name: "Amy".to_owned(),
        last_name: "Pond".to_owned(),
        email: "amy@example.com".to_owned(),
        password: "s3cret-enough".to_owned(),
    };
    assert!(registration(&complete).is_empty());
}

#[test]
fn email_shape_is_permissive_but_not_absent() {
    assert!(email_shape("a@b.co"));
    assert!(email_shape("first.last+tag@sub.domain.org"));
    assert!(!email_shape("not-an-email"));
    assert!(!email_shape("missing@tld"));
    assert!(!email_shape("spaces in@example.com"));
}

#[test]
fn overbooking_threshold_is_110_percent() {
    // 100 seats allow up to 109 bookings; the 110th is refused.
    assert!(!is_overbooked(109, 100));
    assert!(is_overbooked(110, 100));
    assert!(is_overbooked(111, 100));

    // 95 seats round to a limit of 105 (104.5 rounds up).
    assert!(is_overbooked(105, 95));
    assert!(!is_overbooked(104, 95));

    // A zero-capacity flight can never take a booking.
    assert!(is_overbooked(0, 0));
}
