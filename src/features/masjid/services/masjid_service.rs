use tokio::sync::RwLock;

use crate::features::masjid::dtos::TimingsResponseDto;
use crate::features::masjid::models::NamazTimings;

/// Timings live in process memory and reset on restart
pub struct MasjidService {
    timings: RwLock<NamazTimings>,
}

impl MasjidService {
    pub fn new() -> Self {
        Self::with_timings(NamazTimings::default())
    }

    pub fn with_timings(timings: NamazTimings) -> Self {
        Self {
            timings: RwLock::new(timings),
        }
    }

    pub async fn get(&self) -> TimingsResponseDto {
        self.timings.read().await.clone().into()
    }

    pub async fn update(&self, timings: NamazTimings) -> TimingsResponseDto {
        *self.timings.write().await = timings.clone();
        tracing::info!("Namaz timings updated");
        timings.into()
    }
}

impl Default for MasjidService {
    fn default() -> Self {
        Self::new()
    }
}
