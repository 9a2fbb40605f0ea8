use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::modules::documents::Document;
use crate::shared::cells::deserialize_text;
use crate::shared::time::deserialize_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PostType {
    Announcement,
    #[serde(rename = "Duty Timings")]
    DutyTimings,
    Maintenance,
    #[serde(rename = "Future Plans")]
    FuturePlans,
    #[serde(rename = "Progress Update")]
    ProgressUpdate,
    #[serde(rename = "SOPs")]
    Sops,
}

impl PostType {
    pub const ALL: [PostType; 6] = [
        PostType::Announcement,
        PostType::DutyTimings,
        PostType::Maintenance,
        PostType::FuturePlans,
        PostType::ProgressUpdate,
        PostType::Sops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Announcement => "Announcement",
            PostType::DutyTimings => "Duty Timings",
            PostType::Maintenance => "Maintenance",
            PostType::FuturePlans => "Future Plans",
            PostType::ProgressUpdate => "Progress Update",
            PostType::Sops => "SOPs",
        }
    }
}

/// Management post as stored by either backend. `post_type` stays a string
/// so rows written by older clients still list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManagementPost {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_text")]
    pub post_type: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ManagementPost {
    /// Reads a post out of a document; the document id wins over any `id`
    /// field in the body.
    pub fn from_document(doc: Document) -> Self {
        let mut post: ManagementPost = serde_json::from_value(doc.data).unwrap_or_default();
        post.id = doc.id;
        post
    }

    /// Document body; the id lives in the document key, the timestamp as epoch ms.
    pub fn to_document_data(&self) -> Value {
        json!({
            "type": self.post_type,
            "title": self.title,
            "content": self.content,
            "timestamp": self.timestamp.timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::casing::normalize_keys;

    #[test]
    fn test_post_type_wire_names() {
        assert_eq!(
            serde_json::to_value(PostType::DutyTimings).unwrap(),
            json!("Duty Timings")
        );
        let parsed: PostType = serde_json::from_value(json!("SOPs")).unwrap();
        assert_eq!(parsed, PostType::Sops);
        assert!(serde_json::from_value::<PostType>(json!("Gossip")).is_err());
    }

    #[test]
    fn test_sheet_row_decodes() {
        let row = normalize_keys(json!({
            "ID": 1714557600000i64,
            "Type": "Maintenance",
            "Title": "Water tank cleaning",
            "Content": "Supply off from 10 to 12",
            "Timestamp": "2024-05-01T10:00:00Z"
        }));
        let post: ManagementPost = serde_json::from_value(row).unwrap();

        assert_eq!(post.id, "1714557600000");
        assert_eq!(post.post_type, "Maintenance");
        assert_eq!(post.timestamp.timestamp(), 1_714_557_600);
    }

    #[test]
    fn test_document_round_trip_keeps_millis() {
        let post = ManagementPost {
            id: "42".to_string(),
            post_type: "Announcement".to_string(),
            title: "Eid prayers".to_string(),
            content: "At the main ground".to_string(),
            timestamp: DateTime::from_timestamp_millis(1_714_557_600_123).unwrap(),
        };
        let doc = Document {
            id: "42".to_string(),
            data: post.to_document_data(),
            updated_at: Utc::now(),
        };

        assert_eq!(ManagementPost::from_document(doc), post);
    }
}
