//! Wire types for the Brief Assistant API.
//!
//! These mirror the JSON the backend sends and accepts. Timestamps are
//! kept as the ISO-8601 strings the server produces; free-form brief and
//! section content stays as [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl BriefStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BriefStatus::Draft => "draft",
            BriefStatus::InProgress => "in_progress",
            BriefStatus::Completed => "completed",
            BriefStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for BriefStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BriefStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(BriefStatus::Draft),
            "in_progress" => Ok(BriefStatus::InProgress),
            "completed" => Ok(BriefStatus::Completed),
            "archived" => Ok(BriefStatus::Archived),
            other => Err(format!(
                "unknown brief status '{}'. Must be draft, in_progress, completed, or archived.",
                other
            )),
        }
    }
}

/// A brief as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub event_type: Option<String>,
    pub status: BriefStatus,
    #[serde(default)]
    pub created_at: Option<String>, // ISO8601
    #[serde(default)]
    pub updated_at: Option<String>, // ISO8601
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub metadata: Value,
    /// Fields the client does not model, kept so nothing is lost on display.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> i64 {
    1
}

/// Payload for `POST /briefs/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBrief {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    pub brief_metadata: Map<String, Value>,
}

impl NewBrief {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for `PUT /briefs/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BriefChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BriefStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl BriefChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.event_type.is_none()
            && self.status.is_none()
            && self.metadata.is_none()
    }
}

/// A named part of a brief's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub brief_id: String,
    #[serde(default)]
    pub section_number: i64,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub ai_generated: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for `POST /sections/?brief_id=`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSection {
    pub section_number: i64,
    pub section_name: String,
    pub content: Map<String, Value>,
}

/// Partial update for `PUT /sections/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<Map<String, Value>>,
}

/// A file attached to a brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub brief_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub extracted_content: Option<Value>,
}

/// An immutable snapshot of a brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub id: Option<String>,
    pub version_number: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /ai/generate/{section_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub section_name: String,
    pub context: Value,
    pub prompt: Option<String>,
}

/// Result of an AI content generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub generated_content: Value,
}

/// A file to attach to a brief.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming the part after the file's basename.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn brief_keeps_unknown_fields() {
        let brief: Brief = serde_json::from_value(json!({
            "id": "b1",
            "title": "Launch",
            "event_type": null,
            "status": "in_progress",
            "created_at": "2024-05-01T10:00:00.123456",
            "updated_at": "2024-05-01T10:00:00.123456",
            "version": 3,
            "metadata": {"client": "Acme"},
            "owner": "sam"
        }))
        .unwrap();

        assert_eq!(brief.status, BriefStatus::InProgress);
        assert_eq!(brief.version, 3);
        assert_eq!(brief.metadata["client"], "Acme");
        assert_eq!(brief.extra["owner"], "sam");
    }

    #[test]
    fn brief_minimal_payload() {
        let brief: Brief =
            serde_json::from_value(json!({"id": "b2", "status": "draft"})).unwrap();
        assert_eq!(brief.title, "");
        assert_eq!(brief.version, 1);
        assert!(brief.extra.is_empty());
    }

    #[test]
    fn changes_skip_unset_fields() {
        let changes = BriefChanges {
            status: Some(BriefStatus::Completed),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"status": "completed"})
        );
        assert!(!changes.is_empty());
        assert!(BriefChanges::default().is_empty());
    }

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("in_progress".parse::<BriefStatus>(), Ok(BriefStatus::InProgress));
        assert!("done".parse::<BriefStatus>().is_err());
        assert_eq!(BriefStatus::Draft.to_string(), "draft");
    }

    #[test]
    fn new_brief_serializes_metadata_under_brief_metadata() {
        let body = serde_json::to_value(NewBrief::titled("X")).unwrap();
        assert_eq!(body, json!({"title": "X", "brief_metadata": {}}));
    }
}
