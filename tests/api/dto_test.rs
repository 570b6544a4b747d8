//! Coverage for the wire shapes the backend actually sends.

use aerodesk::api::airlines::{AirlineDraft, AirlineDto};
use aerodesk::api::bookings::{BookingCreateRequest, BookingResponse, BookingStatus};
use aerodesk::api::flights::FlightDto;
use aerodesk::api::passengers::PassengerDto;
use aerodesk::api::Page;

#[test]
fn airline_page_parses_with_backend_casing() {
    let body = r#"{
        "content": [{
            "id": 7,
            "codeIATA": "TK",
            "codeICAO": "THY",
            "name": "Turkish Airlines",
            "country": "Turkey",
            "fleetSize": "350",
            "flightIds": [1, 2, 3]
        }],
        "totalElements": 1,
        "totalPages": 1,
        "size": 10,
        "number": 0
    }"#;
    let page: Page<AirlineDto> = serde_json::from_str(body).expect("page should parse");
    assert_eq!(page.total_elements, 1);
    let airline = page.content.first().expect("one airline");
    assert_eq!(airline.code_iata, "TK");
    assert_eq!(airline.code_icao, "THY");
    assert_eq!(airline.fleet_size, "350");
    assert_eq!(airline.flight_ids.as_deref(), Some(&[1, 2, 3][..]));
}

#[test]
fn airline_draft_serializes_backend_casing() {
    let draft = AirlineDraft {
        code_iata: "LH".to_owned(),
        code_icao: "DLH".to_owned(),
        name: "Lufthansa".to_owned(),
        country: "Germany".to_owned(),
        fleet_size: "270".to_owned(),
    };
    let json = serde_json::to_value(&draft).expect("draft serializes");
    assert_eq!(json["codeIATA"], "LH");
    assert_eq!(json["codeICAO"], "DLH");
    assert_eq!(json["fleetSize"], "270");
}

#[test]
fn flight_parses_without_optional_fields() {
    let body = r#"{
        "id": 12,
        "flightNumber": "TK1923",
        "origin": "IST",
        "destination": "AMS",
        "departureTime": "2026-09-01T08:30:00",
        "arrivalTime": "2026-09-01T11:05:00",
        "basePrice": 149.5,
        "capacity": 180,
        "airlineId": 7
    }"#;
    let flight: FlightDto = serde_json::from_str(body).expect("flight should parse");
    assert_eq!(flight.booked_seats, None);
    assert_eq!(flight.airline_name, None);
    assert!((flight.base_price - 149.5).abs() < f64::EPSILON);
}

#[test]
fn passenger_parses_with_and_without_points() {
    let with: PassengerDto = serde_json::from_str(
        r#"{"id":1,"name":"Amy","surname":"Pond","email":"amy@example.com","loyaltyPoints":120}"#,
    )
    .expect("passenger should parse");
    assert_eq!(with.loyalty_points, Some(120));

    let without: PassengerDto = serde_json::from_str(
        r#"{"id":2,"name":"Rory","surname":"Williams","email":"rory@example.com"}"#,
    )
    .expect("passenger should parse");
    assert_eq!(without.loyalty_points, None);
}

#[test]
fn booking_status_uses_screaming_case() {
    let status: BookingStatus =
        serde_json::from_str(r#""WAITLISTED""#).expect("status should parse");
    assert_eq!(status, BookingStatus::Waitlisted);
    assert_eq!(status.to_string(), "WAITLISTED");
    assert!(serde_json::from_str::<BookingStatus>(r#""waitlisted""#).is_err());
}

#[test]
fn booking_response_parses() {
    let body = r#"{
        "bookingId": 501,
        "status": "CONFIRMED",
        "finalPrice": 132.0,
        "message": "Seat 12A confirmed"
    }"#;
    let response: BookingResponse = serde_json::from_str(body).expect("response should parse");
    assert_eq!(response.booking_id, 501);
    assert_eq!(response.status, BookingStatus::Confirmed);
}

#[test]
fn booking_request_omits_absent_passenger() {
    let own = BookingCreateRequest {
        flight_id: 12,
        seat_number: "12A".to_owned(),
        passenger_id: None,
    };
    let json = serde_json::to_value(&own).expect("request serializes");
    assert!(json.get("passengerId").is_none());
    assert_eq!(json["flightId"], 12);

    let on_behalf = BookingCreateRequest {
        passenger_id: Some(3),
        ..own
    };
    let json = serde_json::to_value(&on_behalf).expect("request serializes");
    assert_eq!(json["passengerId"], 3);
}
