use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::complaints::models::Complaint;
use crate::shared::time::time_ago;
use crate::shared::validation::PIN_REGEX;

/// Request DTO for filing a complaint. The villa number is normalized and
/// checked against the directory before saving.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintDto {
    #[validate(length(min = 3, message = "Villa number is required."))]
    pub villa: String,

    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters."
    ))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Description must be between 10 and 500 characters."
    ))]
    pub description: String,

    #[validate(regex(path = *PIN_REGEX, message = "PIN must be 4 digits."))]
    pub pin: String,
}

/// Request DTO for editing a complaint (PIN or admin)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaintDto {
    #[validate(length(min = 3, message = "Villa number is required."))]
    pub villa: String,

    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters."
    ))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Description must be between 10 and 500 characters."
    ))]
    pub description: String,

    pub pin: Option<String>,
}

/// Request DTO for triage. At least one flag must be present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ComplaintStatusDto {
    pub noted: Option<bool>,
    pub resolved: Option<bool>,
}

/// Form payload for `postComplaint` / `updateComplaint`
#[derive(Debug, Serialize)]
pub struct ComplaintPayload<'a> {
    pub id: &'a str,
    pub villa: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponseDto {
    pub id: String,
    pub villa: String,
    pub title: String,
    pub description: String,
    pub noted: bool,
    pub resolved: bool,
    pub resolved_date: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    /// e.g. `3 days ago`
    pub posted_ago: String,
}

impl ComplaintResponseDto {
    pub fn from_complaint(complaint: Complaint, now: DateTime<Utc>) -> Self {
        Self {
            posted_ago: time_ago(complaint.timestamp, now),
            id: complaint.id,
            villa: complaint.villa,
            title: complaint.title,
            description: complaint.description,
            noted: complaint.noted,
            resolved: complaint.resolved,
            resolved_date: complaint.resolved_date,
            timestamp: complaint.timestamp,
        }
    }
}
