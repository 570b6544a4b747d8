//! Airline resource service.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Page};

/// An airline record as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineDto {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Two-character IATA designator.
    #[serde(rename = "codeIATA")]
    pub code_iata: String,
    /// Three-character ICAO designator.
    #[serde(rename = "codeICAO")]
    pub code_icao: String,
    /// Display name.
    pub name: String,
    /// Country of registration.
    pub country: String,
    /// Fleet size, kept as the backend's numeric string.
    pub fleet_size: String,
    /// Ids of flights operated by this airline, when expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_ids: Option<Vec<i64>>,
}

/// Fields of an airline create/update form; the server assigns identity.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineDraft {
    /// Two-character IATA designator.
    #[serde(rename = "codeIATA")]
    pub code_iata: String,
    /// Three-character ICAO designator.
    #[serde(rename = "codeICAO")]
    pub code_icao: String,
    /// Display name.
    pub name: String,
    /// Country of registration.
    pub country: String,
    /// Fleet size as a numeric string.
    pub fleet_size: String,
}

/// Typed operations on `/airlines`.
#[derive(Debug, Clone, Copy)]
pub struct AirlineService<'a> {
    client: &'a ApiClient,
}

impl<'a> AirlineService<'a> {
    /// Service over the shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of airlines.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<AirlineDto>, ApiError> {
        self.client
            .get_json(
                "airlines",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await
    }

    /// A single airline by id.
    ///
    /// # Errors
    ///
    /// `404` surfaces as [`ApiError::Status`]; see [`ApiError::is_not_found`].
    pub async fn get_by_id(&self, id: i64) -> Result<AirlineDto, ApiError> {
        self.client.get_json(&format!("airlines/{id}"), &[]).await
    }

    /// Create an airline.
    ///
    /// # Errors
    ///
    /// Duplicate IATA/ICAO codes come back as a business-rule rejection.
    pub async fn create(&self, draft: &AirlineDraft) -> Result<AirlineDto, ApiError> {
        self.client.post_json("airlines", draft).await
    }

    /// Replace an airline's fields.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn update(&self, id: i64, draft: &AirlineDraft) -> Result<AirlineDto, ApiError> {
        self.client.put_json(&format!("airlines/{id}"), draft).await
    }

    /// Delete an airline.
    ///
    /// # Errors
    ///
    /// The backend refuses when the airline still has booked flights.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("airlines/{id}")).await
    }
}
