//! Client-side form validation.
//!
//! Mirrors a subset of the backend's rules so obviously bad input never
//! leaves the terminal. The backend stays authoritative: everything here
//! can pass and the server may still reject (duplicate codes, capacity,
//! uniqueness), which then flows through [`crate::errmap`] or per-field
//! error display.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::api::airlines::AirlineDraft;
use crate::api::auth::RegisterRequest;

/// Field name to message, reset on every submit attempt.
pub type FieldErrors = BTreeMap<String, String>;

/// Overbooking notice shown when a booking is blocked before submit.
pub const OVERBOOKING_BLOCKED: &str =
    "This flight cannot accept more bookings: the overbooking limit (110%) is reached.";

static IATA_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{2}$").expect("IATA pattern is valid")
});
static ICAO_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{3}$").expect("ICAO pattern is valid")
});
static COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\s().'-]+$").expect("country pattern is valid")
});
static FLEET_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+$").expect("fleet pattern is valid")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid")
});

/// Validate an airline create/update form.
///
/// Empty map means the form may be submitted.
pub fn airline(draft: &AirlineDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.code_iata.trim().is_empty() {
        errors.insert("codeIATA".into(), "IATA code is required".into());
    } else if !IATA_CODE.is_match(&draft.code_iata) {
        errors.insert(
            "codeIATA".into(),
            "IATA code must be exactly 2 characters (A-Z, 0-9)".into(),
        );
    }

    if draft.code_icao.trim().is_empty() {
        errors.insert("codeICAO".into(), "ICAO code is required".into());
    } else if !ICAO_CODE.is_match(&draft.code_icao) {
        errors.insert(
            "codeICAO".into(),
            "ICAO code must be exactly 3 characters (A-Z, 0-9)".into(),
        );
    }

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert("name".into(), "Airline name is required".into());
    } else if name.chars().count() < 2 || name.chars().count() > 100 {
        errors.insert(
            "name".into(),
            "Airline name must be between 2 and 100 characters".into(),
        );
    }

    let country = draft.country.trim();
    if country.is_empty() {
        errors.insert("country".into(), "Country is required".into());
    } else if country.chars().count() < 2 || country.chars().count() > 60 {
        errors.insert(
            "country".into(),
            "Country must be between 2 and 60 characters".into(),
        );
    } else if !COUNTRY.is_match(country) {
        errors.insert("country".into(), "Country must contain letters only".into());
    }

    if draft.fleet_size.trim().is_empty() {
        errors.insert("fleetSize".into(), "Fleet size is required".into());
    } else if !FLEET_SIZE.is_match(draft.fleet_size.trim()) {
        errors.insert("fleetSize".into(), "Fleet size must be a number".into());
    }

    errors
}

/// Validate a registration form.
pub fn registration(request: &RegisterRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if request.first_name.trim().is_empty() {
        errors.insert("firstName".into(), "First name is required.".into());
    }
    if request.last_name.trim().is_empty() {
        errors.insert("lastName".into(), "Last name is required.".into());
    }
    if request.email.trim().is_empty() {
        errors.insert("email".into(), "Email is required.".into());
    } else if !email_shape(request.email.trim()) {
        errors.insert("email".into(), "Email address looks invalid.".into());
    }
    if request.password.is_empty() {
        errors.insert("password".into(), "Password is required.".into());
    }

    errors
}

/// Whether a string looks like an email address.
pub fn email_shape(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Advisory 110% overbooking check.
///
/// The server enforces the real limit; this only spares a round trip when
/// the flight is visibly full.
pub fn is_overbooked(booked_seats: i32, capacity: i32) -> bool {
    f64::from(booked_seats) >= (f64::from(capacity) * 1.10).round()
}
