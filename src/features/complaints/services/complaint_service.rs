use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::verify_record_pin;
use crate::features::auth::models::Session;
use crate::features::complaints::dtos::{
    ComplaintPayload, ComplaintResponseDto, ComplaintStatusDto, CreateComplaintDto,
    UpdateComplaintDto,
};
use crate::features::complaints::models::Complaint;
use crate::features::villas::{normalize_villa_number, VillaService};
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};
use crate::shared::time::now_millis;

const INVALID_VILLA: &str = "Please enter a valid villa number.";

pub struct ComplaintService {
    sheet: Arc<dyn SheetClient>,
    villas: Arc<VillaService>,
}

impl ComplaintService {
    pub fn new(sheet: Arc<dyn SheetClient>, villas: Arc<VillaService>) -> Self {
        Self { sheet, villas }
    }

    /// All complaints, newest first
    pub async fn list(&self) -> Result<Vec<ComplaintResponseDto>> {
        let mut complaints = self.fetch_all().await?;
        complaints.sort_by_key(|c| std::cmp::Reverse(c.timestamp));

        let now = Utc::now();
        Ok(complaints
            .into_iter()
            .map(|c| ComplaintResponseDto::from_complaint(c, now))
            .collect())
    }

    pub async fn create(&self, dto: CreateComplaintDto) -> Result<ComplaintResponseDto> {
        let villa = self.known_villa(&dto.villa)?;
        let id = now_millis().to_string();

        self.sheet
            .post_payload(
                actions::POST_COMPLAINT,
                &ComplaintPayload {
                    id: &id,
                    villa: &villa,
                    title: &dto.title,
                    description: &dto.description,
                    pin: Some(&dto.pin),
                },
            )
            .await?;

        tracing::info!("Complaint submitted: id={}, villa={}", id, villa);

        let now = Utc::now();
        let complaint = Complaint {
            id,
            villa,
            title: dto.title,
            description: dto.description,
            noted: false,
            resolved: false,
            resolved_date: None,
            timestamp: now,
            pin: dto.pin,
        };
        Ok(ComplaintResponseDto::from_complaint(complaint, now))
    }

    pub async fn update(
        &self,
        id: &str,
        dto: UpdateComplaintDto,
        session: Option<&Session>,
    ) -> Result<ComplaintResponseDto> {
        let existing = self.find(id).await?;
        verify_record_pin(&existing.pin, dto.pin.as_deref(), session)?;
        let villa = self.known_villa(&dto.villa)?;

        self.sheet
            .post_payload(
                actions::UPDATE_COMPLAINT,
                &ComplaintPayload {
                    id,
                    villa: &villa,
                    title: &dto.title,
                    description: &dto.description,
                    pin: None,
                },
            )
            .await?;

        tracing::info!("Complaint updated: id={}", id);

        let complaint = Complaint {
            villa,
            title: dto.title,
            description: dto.description,
            ..existing
        };
        Ok(ComplaintResponseDto::from_complaint(complaint, Utc::now()))
    }

    /// Applies each flag with its own `updateComplaintStatus` call.
    /// Resolving stamps `resolvedDate`; un-resolving clears it.
    pub async fn update_status(
        &self,
        id: &str,
        dto: ComplaintStatusDto,
    ) -> Result<ComplaintResponseDto> {
        if dto.noted.is_none() && dto.resolved.is_none() {
            return Err(AppError::BadRequest(
                "Provide at least one of noted or resolved.".to_string(),
            ));
        }

        let mut complaint = self.find(id).await?;

        if let Some(noted) = dto.noted {
            self.sheet
                .post(
                    actions::UPDATE_COMPLAINT_STATUS,
                    vec![
                        ("id".to_string(), id.to_string()),
                        ("noted".to_string(), noted.to_string()),
                    ],
                )
                .await?;
            complaint.noted = noted;
        }

        if let Some(resolved) = dto.resolved {
            let resolved_date = resolved.then(Utc::now);
            self.sheet
                .post(
                    actions::UPDATE_COMPLAINT_STATUS,
                    vec![
                        ("id".to_string(), id.to_string()),
                        ("resolved".to_string(), resolved.to_string()),
                        (
                            "resolvedDate".to_string(),
                            resolved_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                        ),
                    ],
                )
                .await?;
            complaint.resolved = resolved;
            complaint.resolved_date = resolved_date;
        }

        tracing::info!(
            "Complaint status updated: id={}, noted={}, resolved={}",
            id,
            complaint.noted,
            complaint.resolved
        );
        Ok(ComplaintResponseDto::from_complaint(complaint, Utc::now()))
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
            .post(
                actions::DELETE_COMPLAINT,
                vec![("id".to_string(), id.to_string())],
            )
            .await?;

        tracing::info!("Complaint deleted: id={}", id);
        Ok(())
    }

    fn known_villa(&self, raw: &str) -> Result<String> {
        let villa = normalize_villa_number(raw);
        if !self.villas.contains(&villa) {
            return Err(AppError::Validation(INVALID_VILLA.to_string()));
        }
        Ok(villa)
    }

    async fn fetch_all(&self) -> Result<Vec<Complaint>> {
        let complaints: Vec<Complaint> = self.sheet.fetch_as(actions::GET_COMPLAINTS, &[]).await?;
        tracing::debug!("Fetched {} complaints", complaints.len());
        Ok(complaints)
    }

    async fn find(&self, id: &str) -> Result<Complaint> {
        self.fetch_all()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }
}
