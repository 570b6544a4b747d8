//! Coverage for backend message translation.

use aerodesk::errmap::friendly_message;

#[test]
fn missing_message_is_the_generic_fallback() {
    assert_eq!(
        friendly_message(None),
        "An unexpected error occurred. Please try again."
    );
}

#[test]
fn unmatched_message_is_operation_failed() {
    assert_eq!(
        friendly_message(Some("quota exceeded on shard 3")),
        "Operation failed. Please check your input or try again."
    );
}

#[test]
fn matching_is_case_insensitive_substring() {
    assert_eq!(
        friendly_message(Some("Airline with this IATA CODE already exists")),
        "This IATA code is already in use. Please choose another one."
    );
    assert_eq!(
        friendly_message(Some("entity not found in repository")),
        "The requested record could not be found. It may have been deleted."
    );
}

#[test]
fn first_match_wins_when_several_substrings_occur() {
    // Contains both "iata code" and "icao code"; the earlier entry wins.
    assert_eq!(
        friendly_message(Some("duplicate IATA code and ICAO code")),
        "This IATA code is already in use. Please choose another one."
    );
}

#[test]
fn invalid_shadows_invalid_credentials() {
    // "invalid credentials" also contains "invalid", which sits earlier
    // in the table, so the credentials entry is unreachable through it.
    assert_eq!(
        friendly_message(Some("Invalid credentials")),
        "Some of the entered data is invalid. Please check your inputs."
    );
    // "bad credentials" has no earlier shadow and maps as intended.
    assert_eq!(
        friendly_message(Some("Bad credentials")),
        "Invalid email or password. Please try again."
    );
}

#[test]
fn deletion_guards_map_to_their_resources() {
    assert_eq!(
        friendly_message(Some("Airline cannot be deleted while flights exist")),
        "This airline cannot be deleted because it has active bookings."
    );
    assert_eq!(
        friendly_message(Some("Cannot delete flight with existing bookings")),
        "This flight cannot be deleted because it has existing bookings."
    );
}

#[test]
fn overbooking_rejections_carry_the_limit() {
    assert_eq!(
        friendly_message(Some("Overbooking limit reached for flight 12")),
        "This flight cannot accept more bookings: the overbooking limit (110%) is reached."
    );
}
