use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::emergency::models::{EmergencyContact, Vote};
use crate::shared::validation::validate_phone;

/// Request DTO for adding an emergency contact (admin only)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmergencyContactDto {
    /// Service category, e.g. `Plumber`
    #[serde(rename = "type")]
    #[validate(length(min = 3, max = 50, message = "Category is required."))]
    pub contact_type: String,

    #[validate(length(min = 3, max = 50, message = "Name is required."))]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(max = 200, message = "Description must be at most 200 characters."))]
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RateContactDto {
    pub vote: Vote,
}

/// Form payload for `postEmergencyContact`
#[derive(Debug, Serialize)]
pub struct EmergencyContactPayload<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub contact_type: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContactResponseDto {
    pub id: String,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub name: String,
    pub phone: String,
    pub description: String,
    pub likes: u64,
    pub dislikes: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<EmergencyContact> for EmergencyContactResponseDto {
    fn from(contact: EmergencyContact) -> Self {
        Self {
            id: contact.id,
            contact_type: contact.contact_type,
            name: contact.name,
            phone: contact.phone,
            description: contact.description,
            likes: contact.likes,
            dislikes: contact.dislikes,
            timestamp: contact.timestamp,
        }
    }
}
