//! `/briefs` endpoints.

use crate::http::{ApiClient, ApiError};
use crate::models::{Brief, BriefChanges, BriefStatus, NewBrief, Version};

/// Page size used when listing briefs.
pub const DEFAULT_LIMIT: u32 = 100;

/// Export format requested when the caller does not name one.
pub const DEFAULT_EXPORT_FORMAT: &str = "pdf";

pub struct BriefsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BriefsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /briefs?skip=&limit=[&status=]`.
    ///
    /// The status filter is forwarded as-is and omitted when `None`.
    pub async fn list(
        &self,
        status: Option<BriefStatus>,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Brief>, ApiError> {
        let mut query = vec![("skip", skip.to_string()), ("limit", limit.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        self.client.get_json("/briefs", &query).await
    }

    pub async fn get(&self, id: &str) -> Result<Brief, ApiError> {
        self.client.get_json(&format!("/briefs/{}", id), &[]).await
    }

    pub async fn create(&self, data: &NewBrief) -> Result<Brief, ApiError> {
        self.client.post_json("/briefs/", &[], Some(data)).await
    }

    pub async fn update(&self, id: &str, data: &BriefChanges) -> Result<Brief, ApiError> {
        self.client.put_json(&format!("/briefs/{}", id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/briefs/{}", id)).await
    }

    pub async fn versions(&self, id: &str) -> Result<Vec<Version>, ApiError> {
        self.client
            .get_json(&format!("/briefs/{}/versions", id), &[])
            .await
    }

    /// Snapshot the brief's current state as a new version.
    pub async fn create_version(&self, id: &str) -> Result<Version, ApiError> {
        self.client
            .post_json::<(), _>(&format!("/briefs/{}/versions", id), &[], None)
            .await
    }

    /// Download the rendered brief. `format` defaults to
    /// [`DEFAULT_EXPORT_FORMAT`].
    pub async fn export(&self, id: &str, format: Option<&str>) -> Result<Vec<u8>, ApiError> {
        let format = format.unwrap_or(DEFAULT_EXPORT_FORMAT);
        self.client
            .get_bytes(
                &format!("/briefs/{}/export", id),
                &[("format", format.to_string())],
            )
            .await
    }
}
