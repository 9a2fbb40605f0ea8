mod timings_dto;

pub use timings_dto::{PrayerRowDto, StaffRowDto, TimingsResponseDto, UpdateTimingsDto};
