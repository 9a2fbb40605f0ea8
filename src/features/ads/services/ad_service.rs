use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::{AdPayload, AdResponseDto, CreateAdDto, UpdateAdDto};
use crate::features::ads::models::{Ad, AdCategory};
use crate::features::auth::guards::verify_record_pin;
use crate::features::auth::models::Session;
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};
use crate::shared::constants::ALL_ADS;
use crate::shared::time::now_millis;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Classified ads stored in the remote sheet
pub struct AdService {
    sheet: Arc<dyn SheetClient>,
    expiry_hours: i64,
}

impl AdService {
    pub fn new(sheet: Arc<dyn SheetClient>, expiry_hours: i64) -> Self {
        Self {
            sheet,
            expiry_hours,
        }
    }

    pub fn categories(&self) -> Vec<AdCategory> {
        AdCategory::ALL.to_vec()
    }

    /// Active ads, newest first, optionally narrowed to one category
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<AdResponseDto>> {
        let filter = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c == ALL_ADS => None,
            Some(c) => Some(
                AdCategory::parse(c)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", c)))?,
            ),
        };

        let now = now_millis();
        Ok(active_ads(self.fetch_all().await?, filter, now)
            .into_iter()
            .map(|ad| AdResponseDto::from_ad(ad, now))
            .collect())
    }

    pub async fn create(&self, dto: CreateAdDto) -> Result<AdResponseDto> {
        let category = dto
            .category
            .ok_or_else(|| AppError::Validation("Please select a category.".to_string()))?;
        let now = now_millis();
        let id = now.to_string();
        let expiry = expiry_after(now, self.expiry_hours);

        self.sheet
            .post_payload(
                actions::POST_AD,
                &AdPayload {
                    id: &id,
                    category: category.as_str(),
                    title: &dto.title,
                    description: &dto.description,
                    phone: &dto.phone,
                    expiry: Some(expiry),
                    pin: Some(&dto.pin),
                },
            )
            .await?;

        tracing::info!("Ad posted: id={}, category={}", id, category.as_str());

        let ad = Ad {
            id,
            title: dto.title,
            description: dto.description,
            phone: dto.phone,
            category: category.as_str().to_string(),
            expiry,
            timestamp: chrono::Utc::now(),
            pin: dto.pin,
        };
        Ok(AdResponseDto::from_ad(ad, now))
    }

    pub async fn update(
        &self,
        id: &str,
        dto: UpdateAdDto,
        session: Option<&Session>,
    ) -> Result<AdResponseDto> {
        let existing = self.find(id).await?;
        verify_record_pin(&existing.pin, dto.pin.as_deref(), session)?;

        let category = dto
            .category
            .ok_or_else(|| AppError::Validation("Please select a category.".to_string()))?;

        self.sheet
            .post_payload(
                actions::UPDATE_AD,
                &AdPayload {
                    id,
                    category: category.as_str(),
                    title: &dto.title,
                    description: &dto.description,
                    phone: &dto.phone,
                    expiry: None,
                    pin: None,
                },
            )
            .await?;

        tracing::info!("Ad updated: id={}", id);

        let ad = Ad {
            title: dto.title,
            description: dto.description,
            phone: dto.phone,
            category: category.as_str().to_string(),
            ..existing
        };
        Ok(AdResponseDto::from_ad(ad, now_millis()))
    }

    pub async fn delete(
        &self,
        id: &str,
        pin: Option<&str>,
        session: Option<&Session>,
    ) -> Result<()> {
        let existing = self.find(id).await?;
        verify_record_pin(&existing.pin, pin, session)?;

        self.sheet
            .post(actions::DELETE_AD, vec![("id".to_string(), id.to_string())])
            .await?;

        tracing::info!("Ad deleted: id={}", id);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Ad>> {
        let ads: Vec<Ad> = self.sheet.fetch_as(actions::GET_ADS, &[]).await?;
        tracing::debug!("Fetched {} ads", ads.len());
        Ok(ads)
    }

    async fn find(&self, id: &str) -> Result<Ad> {
        self.fetch_all()
            .await?
            .into_iter()
            .find(|ad| ad.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))
    }
}

/// Unexpired ads in `category` (all when `None`), newest first
pub fn active_ads(ads: Vec<Ad>, category: Option<AdCategory>, now_ms: i64) -> Vec<Ad> {
    let mut active: Vec<Ad> = ads
        .into_iter()
        .filter(|ad| ad.is_active(now_ms))
        .filter(|ad| match category {
            Some(c) => ad.category == c.as_str(),
            None => true,
        })
        .collect();
    active.sort_by_key(|ad| std::cmp::Reverse(ad.timestamp));
    active
}

/// Clamps at `i64::MAX` instead of overflowing
fn expiry_after(now_ms: i64, hours: i64) -> i64 {
    now_ms.saturating_add(hours.saturating_mul(HOUR_MS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ad(id: &str, category: &str, expiry: i64, ts_secs: i64) -> Ad {
        Ad {
            id: id.to_string(),
            title: format!("Ad {}", id),
            description: String::new(),
            phone: String::new(),
            category: category.to_string(),
            expiry,
            timestamp: Utc.timestamp_opt(ts_secs, 0).unwrap(),
            pin: "1234".to_string(),
        }
    }

    #[test]
    fn test_expiry_after_hours() {
        assert_eq!(expiry_after(1_000, 24), 1_000 + 24 * HOUR_MS);
        assert_eq!(expiry_after(1_000, i64::MAX), i64::MAX);
    }

    #[test]
    fn test_expired_ads_are_excluded() {
        let now = 1_000_000;
        let ads = vec![
            ad("expired", "Food", now - 1, 10),
            ad("edge", "Food", now, 20),
            ad("live", "Food", now + 1, 30),
        ];

        let ids: Vec<_> = active_ads(ads, None, now).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["live"]);
    }

    #[test]
    fn test_category_filter_and_order() {
        let now = 0;
        let ads = vec![
            ad("old-food", "Food", 10, 100),
            ad("property", "Property", 10, 300),
            ad("new-food", "Food", 10, 200),
        ];

        let all: Vec<_> = active_ads(ads.clone(), None, now)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(all, vec!["property", "new-food", "old-food"]);

        let food: Vec<_> = active_ads(ads, Some(AdCategory::Food), now)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(food, vec!["new-food", "old-food"]);
    }
}
