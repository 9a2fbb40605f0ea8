use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::ManagementPasswordDto;
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};

pub struct AdminService {
    sheet: Arc<dyn SheetClient>,
}

impl AdminService {
    pub fn new(sheet: Arc<dyn SheetClient>) -> Self {
        Self { sheet }
    }

    pub async fn management_password(&self) -> Result<ManagementPasswordDto> {
        Ok(self
            .sheet
            .fetch_as(actions::GET_MANAGEMENT_PASSWORD, &[])
            .await?)
    }

    pub async fn set_management_password(&self, password: &str) -> Result<()> {
        if password.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Please enter a new password.".to_string(),
            ));
        }

        self.sheet
            .post(
                actions::SET_MANAGEMENT_PASSWORD,
                vec![("password".to_string(), password.to_string())],
            )
            .await?;

        tracing::info!("Management password changed");
        Ok(())
    }
}
