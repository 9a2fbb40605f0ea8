use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::ads::models::{Ad, AdCategory};
use crate::shared::time::hours_left;
use crate::shared::validation::{validate_phone, PIN_REGEX};

/// Query params for listing ads
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdListQueryDto {
    /// An ad category, or `All Ads` (the default)
    pub category: Option<String>,
}

/// Request DTO for posting an ad
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdDto {
    #[validate(required(message = "Please select a category."))]
    pub category: Option<AdCategory>,

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

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(regex(path = *PIN_REGEX, message = "PIN must be 4 digits."))]
    pub pin: String,
}

/// Request DTO for editing an ad. `pin` must match the ad's PIN unless the
/// caller is admin.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAdDto {
    #[validate(required(message = "Please select a category."))]
    pub category: Option<AdCategory>,

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

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    pub pin: Option<String>,
}

/// Form payload for `postAd` / `updateAd`
#[derive(Debug, Serialize)]
pub struct AdPayload<'a> {
    pub id: &'a str,
    pub category: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdResponseDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub phone: String,
    pub category: String,
    /// Epoch milliseconds
    pub expiry: i64,
    pub timestamp: DateTime<Utc>,
    /// Whole hours until expiry, rounded up
    pub hours_left: i64,
}

impl AdResponseDto {
    pub fn from_ad(ad: Ad, now_ms: i64) -> Self {
        Self {
            hours_left: hours_left(ad.expiry, now_ms),
            id: ad.id,
            title: ad.title,
            description: ad.description,
            phone: ad.phone,
            category: ad.category,
            expiry: ad.expiry,
            timestamp: ad.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(value: serde_json::Value) -> CreateAdDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_ad_validation() {
        let valid = create(json!({
            "category": "Food",
            "title": "Fresh samosas",
            "description": "Hot samosas every evening",
            "phone": "0300 1234567",
            "pin": "1234"
        }));
        assert!(valid.validate().is_ok());

        let bad_pin = CreateAdDto {
            pin: "12a4".to_string(),
            ..valid.clone()
        };
        let errors = bad_pin.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("pin"));

        let no_category = CreateAdDto {
            category: None,
            ..valid.clone()
        };
        assert!(no_category.validate().is_err());

        let short_title = CreateAdDto {
            title: "Hi".to_string(),
            ..valid
        };
        let errors = short_title.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
