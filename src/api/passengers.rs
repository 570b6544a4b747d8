//! Passenger resource service.
//!
//! One quirk inherited from the backend: the list endpoint answers with a
//! page envelope on some deployments and a bare array on others, so
//! [`PassengerService::list`] tolerates both.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Page};

/// A passenger record as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDto {
    /// Backend-assigned identifier.
    pub id: i64,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Email, unique server-side.
    pub email: String,
    /// Accrued loyalty points; absent on some projections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<i64>,
}

/// Fields of a passenger create/update form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDraft {
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Email, checked for uniqueness server-side.
    pub email: String,
}

/// Either response shape of the passenger list endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PassengerListResponse {
    /// The usual page envelope.
    Paged(Page<PassengerDto>),
    /// A bare array, as older backends answer.
    Bare(Vec<PassengerDto>),
}

/// Typed operations on `/passengers`.
#[derive(Debug, Clone, Copy)]
pub struct PassengerService<'a> {
    client: &'a ApiClient,
}

impl<'a> PassengerService<'a> {
    /// Service over the shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All passengers on the requested page, whatever the wire shape.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn list(&self, page: u32, size: u32) -> Result<Vec<PassengerDto>, ApiError> {
        let response: PassengerListResponse = self
            .client
            .get_json(
                "passengers",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(match response {
            PassengerListResponse::Paged(page) => page.content,
            PassengerListResponse::Bare(list) => list,
        })
    }

    /// A single passenger by id.
    ///
    /// # Errors
    ///
    /// `404` surfaces as [`ApiError::Status`].
    pub async fn get_by_id(&self, id: i64) -> Result<PassengerDto, ApiError> {
        self.client.get_json(&format!("passengers/{id}"), &[]).await
    }

    /// Create a passenger.
    ///
    /// # Errors
    ///
    /// A duplicate email comes back as a business-rule rejection.
    pub async fn create(&self, draft: &PassengerDraft) -> Result<PassengerDto, ApiError> {
        self.client.post_json("passengers", draft).await
    }

    /// Replace a passenger's fields.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn update(&self, id: i64, draft: &PassengerDraft) -> Result<PassengerDto, ApiError> {
        self.client
            .put_json(&format!("passengers/{id}"), draft)
            .await
    }

    /// Delete a passenger.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("passengers/{id}")).await
    }

    /// Whether an email is still free, as a pre-submit UX hint.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn check_email_unique(&self, email: &str) -> Result<bool, ApiError> {
        self.client
            .get_json("passengers/check-email", &[("email", email.to_owned())])
            .await
    }

    /// Adjust a passenger's loyalty balance by `delta` points.
    ///
    /// # Errors
    ///
    /// The backend rejects adjustments that would go below zero.
    pub async fn adjust_loyalty(&self, id: i64, delta: i64) -> Result<(), ApiError> {
        self.client
            .patch_empty(
                &format!("passengers/{id}/loyalty"),
                &[("delta", delta.to_string())],
            )
            .await
    }
}
