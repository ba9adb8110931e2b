//! `/documents` endpoints.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::http::{ApiClient, ApiError};
use crate::models::{Document, Upload};

pub struct DocumentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DocumentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_by_brief(&self, brief_id: &str) -> Result<Vec<Document>, ApiError> {
        self.client
            .get_json(&format!("/documents/brief/{}", brief_id), &[])
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Document, ApiError> {
        self.client.get_json(&format!("/documents/{}", id), &[]).await
    }

    /// `POST /documents/upload?brief_id=` with the file in a multipart
    /// part named `file`.
    pub async fn upload(&self, brief_id: &str, upload: Upload) -> Result<Document, ApiError> {
        let part = Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = Form::new().part("file", part);
        self.client
            .post_multipart(
                "/documents/upload",
                &[("brief_id", brief_id.to_string())],
                form,
            )
            .await
    }

    /// Ask the backend to analyze a document for one named section.
    pub async fn analyze(&self, id: &str, section_name: &str) -> Result<Value, ApiError> {
        self.client
            .post_json::<(), _>(
                &format!("/documents/{}/analyze", id),
                &[("section_name", section_name.to_string())],
                None,
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/documents/{}", id)).await
    }
}
