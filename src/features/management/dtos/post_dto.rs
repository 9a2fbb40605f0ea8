use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::management::models::{ManagementPost, PostType};

const FILL_ALL_FIELDS: &str = "Please fill all fields.";
const MAX_TITLE_CHARS: usize = 100;
const MAX_CONTENT_CHARS: usize = 5000;

fn bounded_text(value: &str, max: usize, too_long: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(FILL_ALL_FIELDS)));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(too_long)));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    bounded_text(title, MAX_TITLE_CHARS, "Title must be at most 100 characters.")
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    bounded_text(content, MAX_CONTENT_CHARS, "Content must be at most 5000 characters.")
}

/// Request DTO for publishing a post
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateManagementPostDto {
    #[serde(rename = "type")]
    #[validate(required(message = "Please fill all fields."))]
    pub post_type: Option<PostType>,

    #[validate(
        required(message = "Please fill all fields."),
        custom(function = "validate_title")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Please fill all fields."),
        custom(function = "validate_content")
    )]
    pub content: Option<String>,
}

/// Request DTO for editing a post. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateManagementPostDto {
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,

    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_content"))]
    pub content: Option<String>,
}

impl UpdateManagementPostDto {
    /// Applies the supplied fields over `post`
    pub fn merge_into(self, post: ManagementPost) -> ManagementPost {
        ManagementPost {
            post_type: self
                .post_type
                .map(|t| t.as_str().to_string())
                .unwrap_or(post.post_type),
            title: self.title.unwrap_or(post.title),
            content: self.content.unwrap_or(post.content),
            ..post
        }
    }
}

/// Form payload for `postManagementPost` / `updateManagementPost`
#[derive(Debug, Serialize)]
pub struct ManagementPostPayload<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub post_type: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl<'a> From<&'a ManagementPost> for ManagementPostPayload<'a> {
    fn from(post: &'a ManagementPost) -> Self {
        Self {
            id: &post.id,
            post_type: &post.post_type,
            title: &post.title,
            content: &post.content,
            timestamp: post.timestamp.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManagementPostResponseDto {
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ManagementPost> for ManagementPostResponseDto {
    fn from(post: ManagementPost) -> Self {
        Self {
            id: post.id,
            post_type: post.post_type,
            title: post.title,
            content: post.content,
            timestamp: post.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use serde_json::json;

    fn validation_messages(dto: &impl Validate) -> Vec<String> {
        match dto.validate().map_err(AppError::from) {
            Err(AppError::Validation(msg)) => msg.split('\n').map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_missing_fields_collapse_to_one_message() {
        let dto: CreateManagementPostDto = serde_json::from_value(json!({ "title": "  " })).unwrap();
        assert_eq!(validation_messages(&dto), vec![FILL_ALL_FIELDS.to_string()]);
    }

    #[test]
    fn test_length_limits() {
        let dto: CreateManagementPostDto = serde_json::from_value(json!({
            "type": "Announcement",
            "title": "x".repeat(101),
            "content": "ok"
        }))
        .unwrap();
        assert_eq!(
            validation_messages(&dto),
            vec!["Title must be at most 100 characters.".to_string()]
        );

        let dto: CreateManagementPostDto = serde_json::from_value(json!({
            "type": "SOPs",
            "title": "x".repeat(100),
            "content": "y".repeat(5000)
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let post = ManagementPost {
            id: "1".to_string(),
            post_type: "Announcement".to_string(),
            title: "Old".to_string(),
            content: "Body".to_string(),
            timestamp: Utc::now(),
        };
        let patch = UpdateManagementPostDto {
            post_type: Some(PostType::Maintenance),
            title: None,
            content: Some("New body".to_string()),
        };
        let merged = patch.merge_into(post.clone());

        assert_eq!(merged.post_type, "Maintenance");
        assert_eq!(merged.title, "Old");
        assert_eq!(merged.content, "New body");
        assert_eq!(merged.timestamp, post.timestamp);
    }
}
