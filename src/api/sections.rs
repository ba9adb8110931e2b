//! `/sections` endpoints.

use crate::http::{ApiClient, ApiError};
use crate::models::{NewSection, Section, SectionChanges};

pub struct SectionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SectionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_by_brief(&self, brief_id: &str) -> Result<Vec<Section>, ApiError> {
        self.client
            .get_json(&format!("/sections/brief/{}", brief_id), &[])
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Section, ApiError> {
        self.client.get_json(&format!("/sections/{}", id), &[]).await
    }

    /// `POST /sections/?brief_id=`.
    pub async fn create(&self, brief_id: &str, data: &NewSection) -> Result<Section, ApiError> {
        self.client
            .post_json("/sections/", &[("brief_id", brief_id.to_string())], Some(data))
            .await
    }

    pub async fn update(&self, id: &str, data: &SectionChanges) -> Result<Section, ApiError> {
        self.client.put_json(&format!("/sections/{}", id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/sections/{}", id)).await
    }
}
