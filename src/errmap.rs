//! Backend error message translation.
//!
//! The backend reports business-rule rejections as bare English strings.
//! [`friendly_message`] turns those into user-facing text via an ordered,
//! case-insensitive substring table; first match wins, so the order of
//! `PATTERNS` is part of the contract.

/// Fallback for a missing message.
const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";

/// Fallback for an unmatched message.
const OPERATION_FAILED: &str = "Operation failed. Please check your input or try again.";

/// Ordered (lowercase substring, display message) pairs.
///
/// Earlier entries shadow later ones when several substrings occur in the
/// same backend message.
const PATTERNS: &[(&str, &str)] = &[
    (
        "iata code",
        "This IATA code is already in use. Please choose another one.",
    ),
    (
        "icao code",
        "This ICAO code is already in use. Please choose another one.",
    ),
    (
        "no changes detected",
        "No changes were detected. Please modify a field before saving.",
    ),
    (
        "overbooking",
        "This flight cannot accept more bookings: the overbooking limit (110%) is reached.",
    ),
    (
        "cannot be deleted",
        "This airline cannot be deleted because it has active bookings.",
    ),
    (
        "booked",
        "This airline cannot be deleted because it has active bookings.",
    ),
    (
        "not found",
        "The requested record could not be found. It may have been deleted.",
    ),
    (
        "validation",
        "Some of the entered data is invalid. Please check your inputs.",
    ),
    (
        "invalid",
        "Some of the entered data is invalid. Please check your inputs.",
    ),
    (
        "cannot delete flight with existing bookings",
        "This flight cannot be deleted because it has existing bookings.",
    ),
    (
        "email is already registered",
        "This email address is already registered. Please use another email.",
    ),
    (
        "bad credentials",
        "Invalid email or password. Please try again.",
    ),
    (
        "invalid credentials",
        "Invalid email or password. Please try again.",
    ),
];

/// Map a raw backend message to a user-facing one.
///
/// Pure and total: `None` and unmatched inputs both produce a generic
/// fallback; nothing panics.
pub fn friendly_message(raw: Option<&str>) -> &'static str {
    let Some(raw) = raw else {
        return UNEXPECTED;
    };
    let normalized = raw.to_lowercase();
    for (pattern, message) in PATTERNS {
        if normalized.contains(pattern) {
            return message;
        }
    }
    OPERATION_FAILED
}
