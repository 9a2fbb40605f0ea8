use std::sync::Arc;

use crate::core::error::Result;
use crate::features::mart::dtos::MartStatusResponseDto;
use crate::features::mart::models::{MartStatus, MartStatusRow};
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};

pub struct MartService {
    sheet: Arc<dyn SheetClient>,
    /// Sent with every update; the script checks it
    owner_password: String,
}

impl MartService {
    pub fn new(sheet: Arc<dyn SheetClient>, owner_password: impl Into<String>) -> Self {
        Self {
            sheet,
            owner_password: owner_password.into(),
        }
    }

    /// Current status. Anything the script cannot tell us reads as closed.
    pub async fn current(&self) -> MartStatusResponseDto {
        let row = match self
            .sheet
            .fetch_as::<MartStatusRow>(actions::GET_MART_STATUS, &[])
            .await
        {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Mart status unavailable, showing closed: {}", e);
                MartStatusRow::default()
            }
        };

        let status = MartStatus::parse(&row.status).unwrap_or(MartStatus::Closed);
        MartStatusResponseDto::new(status, row.last_updated)
    }

    pub fn statuses(&self) -> Vec<MartStatusResponseDto> {
        MartStatus::ALL
            .into_iter()
            .map(|s| MartStatusResponseDto::new(s, None))
            .collect()
    }

    pub async fn update(&self, status: MartStatus) -> Result<MartStatusResponseDto> {
        self.sheet
            .post(
                actions::UPDATE_MART_STATUS,
                vec![
                    ("status".to_string(), status.as_str().to_string()),
                    ("password".to_string(), self.owner_password.clone()),
                ],
            )
            .await?;

        tracing::info!("Mart status updated: {}", status.as_str());
        Ok(self.current().await)
    }
}
