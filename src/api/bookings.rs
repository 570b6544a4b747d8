//! Booking resource service.
//!
//! Bookings come in three read shapes: the plain record, the admin list
//! row (flight and passenger denormalized for display), and the
//! passenger-facing view with earned loyalty points. Cancellation is the
//! only mutation after creation; nothing is ever hard-deleted from the
//! client's point of view.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Page};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Seat allocated and paid.
    Confirmed,
    /// Cancelled by the passenger or an admin.
    Cancelled,
    /// Capacity reached; waiting for a freed seat.
    Waitlisted,
}

impl BookingStatus {
    /// Display name for tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Waitlisted => "WAITLISTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A booking record as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Booked flight id.
    pub flight_id: i64,
    /// Owning passenger id; only present for admin reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_id: Option<i64>,
    /// Allocated seat, e.g. `12A`.
    pub seat_number: String,
    /// Current lifecycle status.
    pub booking_status: BookingStatus,
    /// Final price paid.
    pub price: f64,
}

/// Request body for creating a booking.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreateRequest {
    /// Flight to book.
    pub flight_id: i64,
    /// Requested seat.
    pub seat_number: String,
    /// Target passenger; admins book on behalf of others, users omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_id: Option<i64>,
}

/// Backend confirmation of a booking request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Id of the created booking.
    pub booking_id: i64,
    /// Status the booking landed in (confirmed or waitlisted).
    pub status: BookingStatus,
    /// Price after server-side pricing rules.
    pub final_price: f64,
    /// Human-readable confirmation.
    pub message: String,
}

/// Admin list row with flight and passenger details denormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAdminRow {
    /// Booking id.
    pub id: i64,
    /// Marketing flight number.
    pub flight_number: String,
    /// Departure airport.
    pub origin: String,
    /// Arrival airport.
    pub destination: String,
    /// Passenger display name.
    pub passenger_name: String,
    /// Allocated seat.
    pub seat_number: String,
    /// Current lifecycle status.
    pub booking_status: BookingStatus,
    /// Final price paid.
    pub price: f64,
}

/// Passenger-facing view of one of their bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerBookingDto {
    /// Booking id.
    pub booking_id: i64,
    /// Marketing flight number.
    pub flight_number: String,
    /// Departure airport.
    pub origin: String,
    /// Arrival airport.
    pub destination: String,
    /// ISO departure timestamp.
    pub departure_time: String,
    /// ISO arrival timestamp.
    pub arrival_time: String,
    /// Current lifecycle status, as the backend spells it.
    pub booking_status: String,
    /// Allocated seat.
    pub seat_number: String,
    /// Final price paid.
    pub price: f64,
    /// Loyalty points earned by this booking.
    pub loyalty_earned: i64,
}

/// Typed operations on `/bookings`.
#[derive(Debug, Clone, Copy)]
pub struct BookingService<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingService<'a> {
    /// Service over the shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of admin rows; requires the admin role server-side.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn list_admin(&self, page: u32, size: u32) -> Result<Page<BookingAdminRow>, ApiError> {
        self.client
            .get_json(
                "bookings",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await
    }

    /// A single booking by id.
    ///
    /// # Errors
    ///
    /// `404` surfaces as [`ApiError::Status`].
    pub async fn get_by_id(&self, id: i64) -> Result<BookingDto, ApiError> {
        self.client.get_json(&format!("bookings/{id}"), &[]).await
    }

    /// Request a booking; seat allocation and pricing happen server-side.
    ///
    /// # Errors
    ///
    /// Overbooking and seat conflicts come back as business-rule
    /// rejections.
    pub async fn create(&self, request: &BookingCreateRequest) -> Result<BookingResponse, ApiError> {
        self.client.post_json("bookings", request).await
    }

    /// Cancel a booking (status moves to `CANCELLED`).
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn cancel(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .post_empty(&format!("bookings/{id}/cancel"), &[])
            .await
    }

    /// The signed-in passenger's own bookings.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn my_bookings(&self) -> Result<Vec<PassengerBookingDto>, ApiError> {
        self.client.get_json("bookings/me", &[]).await
    }

    /// A given passenger's bookings; admin view.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn passenger_bookings(
        &self,
        passenger_id: i64,
    ) -> Result<Vec<PassengerBookingDto>, ApiError> {
        self.client
            .get_json(&format!("passengers/{passenger_id}/bookings"), &[])
            .await
    }
}
