//! `/ai` endpoints.

use serde_json::Value;

use crate::http::{ApiClient, ApiError};
use crate::models::{GenerateRequest, GeneratedContent};

pub struct AiApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AiApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Generate content for a section from `context` and an optional
    /// free-text prompt.
    pub async fn generate(
        &self,
        section_id: &str,
        context: Value,
        prompt: Option<String>,
    ) -> Result<GeneratedContent, ApiError> {
        let body = GenerateRequest {
            section_name: String::new(),
            context,
            prompt,
        };
        self.client
            .post_json(&format!("/ai/generate/{}", section_id), &[], Some(&body))
            .await
    }

    /// Suggestions for a single field; `context` is sent as the whole body.
    pub async fn suggestions(&self, field_name: &str, context: &Value) -> Result<Value, ApiError> {
        self.client
            .post_json(
                "/ai/suggestions",
                &[("field_name", field_name.to_string())],
                Some(context),
            )
            .await
    }

    /// Fill a section from the brief's uploaded documents.
    pub async fn auto_populate(&self, section_id: &str, brief_id: &str) -> Result<Value, ApiError> {
        self.client
            .post_json::<(), _>(
                &format!("/ai/auto-populate/{}", section_id),
                &[("brief_id", brief_id.to_string())],
                None,
            )
            .await
    }
}
