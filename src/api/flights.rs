//! Flight resource service.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Page};

/// A flight record as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Marketing flight number, e.g. `TK1923`.
    pub flight_number: String,
    /// Departure airport.
    pub origin: String,
    /// Arrival airport.
    pub destination: String,
    /// ISO departure timestamp.
    pub departure_time: String,
    /// ISO arrival timestamp.
    pub arrival_time: String,
    /// Base ticket price before loyalty adjustments.
    pub base_price: f64,
    /// Physical seat capacity.
    pub capacity: i32,
    /// Seats already booked; absent on some projections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_seats: Option<i32>,
    /// Operating airline id.
    pub airline_id: i64,
    /// Denormalized airline name for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_name: Option<String>,
}

/// Fields of a flight create/update form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDraft {
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
    /// Base ticket price.
    pub base_price: f64,
    /// Physical seat capacity.
    pub capacity: i32,
    /// Operating airline id.
    pub airline_id: i64,
}

/// Typed operations on `/flights`.
#[derive(Debug, Clone, Copy)]
pub struct FlightService<'a> {
    client: &'a ApiClient,
}

impl<'a> FlightService<'a> {
    /// Service over the shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of flights, optionally sorted (`field,asc|desc`).
    ///
    /// The sort parameter only goes on the wire when non-empty.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn list(
        &self,
        page: u32,
        size: u32,
        sort: Option<&str>,
    ) -> Result<Page<FlightDto>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(sort) = sort {
            if !sort.trim().is_empty() {
                query.push(("sort", sort.to_owned()));
            }
        }
        self.client.get_json("flights", &query).await
    }

    /// A single flight by id.
    ///
    /// # Errors
    ///
    /// `404` surfaces as [`ApiError::Status`].
    pub async fn get_by_id(&self, id: i64) -> Result<FlightDto, ApiError> {
        self.client.get_json(&format!("flights/{id}"), &[]).await
    }

    /// Create a flight.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn create(&self, draft: &FlightDraft) -> Result<FlightDto, ApiError> {
        self.client.post_json("flights", draft).await
    }

    /// Replace a flight's fields.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn update(&self, id: i64, draft: &FlightDraft) -> Result<FlightDto, ApiError> {
        self.client.put_json(&format!("flights/{id}"), draft).await
    }

    /// Delete a flight.
    ///
    /// # Errors
    ///
    /// The backend refuses while bookings exist on the flight.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("flights/{id}")).await
    }
}
