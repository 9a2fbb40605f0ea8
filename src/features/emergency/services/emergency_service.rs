use std::sync::Arc;

use chrono::Utc;

use crate::core::error::Result;
use crate::features::emergency::dtos::{
    CreateEmergencyContactDto, EmergencyContactPayload, EmergencyContactResponseDto,
};
use crate::features::emergency::models::{EmergencyContact, Vote};
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};

pub struct EmergencyService {
    sheet: Arc<dyn SheetClient>,
}

impl EmergencyService {
    pub fn new(sheet: Arc<dyn SheetClient>) -> Self {
        Self { sheet }
    }

    /// Contacts grouped by type, then by name
    pub async fn list(&self) -> Result<Vec<EmergencyContactResponseDto>> {
        let mut contacts: Vec<EmergencyContact> = self
            .sheet
            .fetch_as(actions::GET_EMERGENCY_CONTACTS, &[])
            .await?;
        tracing::debug!("Fetched {} emergency contacts", contacts.len());

        contacts.sort_by(|a, b| {
            a.contact_type
                .to_lowercase()
                .cmp(&b.contact_type.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(contacts.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        dto: CreateEmergencyContactDto,
    ) -> Result<EmergencyContactResponseDto> {
        let now = Utc::now();
        let id = now.timestamp_millis().to_string();
        let description = dto.description.unwrap_or_default();

        self.sheet
            .post_payload(
                actions::POST_EMERGENCY_CONTACT,
                &EmergencyContactPayload {
                    id: &id,
                    contact_type: &dto.contact_type,
                    name: &dto.name,
                    phone: &dto.phone,
                    description: &description,
                },
            )
            .await?;

        tracing::info!("Emergency contact added: id={}, type={}", id, dto.contact_type);

        Ok(EmergencyContactResponseDto {
            id,
            contact_type: dto.contact_type,
            name: dto.name,
            phone: dto.phone,
            description,
            likes: 0,
            dislikes: 0,
            timestamp: now,
        })
    }

    pub async fn rate(&self, id: &str, vote: Vote) -> Result<()> {
        self.sheet
            .post(
                actions::RATE_EMERGENCY_CONTACT,
                vec![
                    ("id".to_string(), id.to_string()),
                    ("type".to_string(), vote.as_str().to_string()),
                ],
            )
            .await?;

        tracing::info!("Emergency contact rated: id={}, vote={}", id, vote.as_str());
        Ok(())
    }
}
