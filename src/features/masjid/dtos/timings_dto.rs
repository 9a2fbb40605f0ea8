use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::masjid::models::{format_time, NamazTimings};
use crate::shared::validation::validate_optional_time;

/// Replacement timings; times are `HH:MM` or empty
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTimingsDto {
    #[validate(custom(function = "validate_optional_time"))]
    pub fajr: String,
    #[validate(custom(function = "validate_optional_time"))]
    pub zuhar: String,
    #[validate(custom(function = "validate_optional_time"))]
    pub asar: String,
    #[validate(custom(function = "validate_optional_time"))]
    pub maghrib: String,
    #[validate(custom(function = "validate_optional_time"))]
    pub isha: String,
    #[validate(custom(function = "validate_optional_time"))]
    pub jumma: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub imam: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub moazin: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub khadim: String,
}

impl From<UpdateTimingsDto> for NamazTimings {
    fn from(dto: UpdateTimingsDto) -> Self {
        Self {
            fajr: dto.fajr,
            zuhar: dto.zuhar,
            asar: dto.asar,
            maghrib: dto.maghrib,
            isha: dto.isha,
            jumma: dto.jumma,
            imam: dto.imam,
            moazin: dto.moazin,
            khadim: dto.khadim,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrayerRowDto {
    pub name: String,
    pub key: String,
    /// e.g. `01:30 PM`
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffRowDto {
    pub role: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimingsResponseDto {
    pub timings: NamazTimings,
    pub prayers: Vec<PrayerRowDto>,
    pub staff: Vec<StaffRowDto>,
}

impl From<NamazTimings> for TimingsResponseDto {
    fn from(timings: NamazTimings) -> Self {
        let prayers = timings
            .prayers()
            .into_iter()
            .map(|(name, key, raw)| PrayerRowDto {
                name: name.to_string(),
                key: key.to_string(),
                time: format_time(raw),
            })
            .collect();
        let staff = timings
            .staff()
            .into_iter()
            .map(|(role, key, name)| StaffRowDto {
                role: role.to_string(),
                key: key.to_string(),
                name: name.to_string(),
            })
            .collect();

        Self {
            timings,
            prayers,
            staff,
        }
    }
}
