use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::ads::{dtos as ads_dtos, handlers as ads_handlers, models as ads_models};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, models as auth_models};
use crate::features::complaints::{dtos as complaints_dtos, handlers as complaints_handlers};
use crate::features::emergency::{
    dtos as emergency_dtos, handlers as emergency_handlers, models as emergency_models,
};
use crate::features::management::{
    dtos as management_dtos, handlers as management_handlers, models as management_models,
};
use crate::features::mart::{dtos as mart_dtos, handlers as mart_handlers, models as mart_models};
use crate::features::masjid::{
    dtos as masjid_dtos, handlers as masjid_handlers, models as masjid_models,
};
use crate::features::villas::{dtos as villas_dtos, handlers as villas_handlers};
use crate::modules::documents::{DocState, Document, PermissionError};
use crate::shared::types::{ApiResponse, Meta, RecordPinDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_session,
        // Villas
        villas_handlers::list_villas,
        villas_handlers::get_villa,
        // Ads
        ads_handlers::list_ads,
        ads_handlers::list_categories,
        ads_handlers::create_ad,
        ads_handlers::update_ad,
        ads_handlers::delete_ad,
        // Complaints
        complaints_handlers::list_complaints,
        complaints_handlers::create_complaint,
        complaints_handlers::update_complaint,
        complaints_handlers::update_complaint_status,
        complaints_handlers::delete_complaint,
        // Management
        management_handlers::list_posts,
        management_handlers::get_post,
        management_handlers::list_post_types,
        management_handlers::create_post,
        management_handlers::update_post,
        management_handlers::delete_post,
        management_handlers::stream_post,
        // Emergency
        emergency_handlers::list_contacts,
        emergency_handlers::create_contact,
        emergency_handlers::rate_contact,
        // Mart
        mart_handlers::get_status,
        mart_handlers::list_statuses,
        mart_handlers::update_status,
        // Masjid
        masjid_handlers::get_timings,
        masjid_handlers::update_timings,
        // Admin
        admin_handlers::get_management_password,
        admin_handlers::set_management_password,
    ),
    components(
        schemas(
            // Shared
            Meta,
            RecordPinDto,
            // Auth
            auth_models::Role,
            auth_dtos::LoginRequestDto,
            auth_dtos::LogoutRequestDto,
            auth_dtos::SessionStatusDto,
            auth_dtos::SessionTokenDto,
            ApiResponse<auth_dtos::SessionTokenDto>,
            ApiResponse<auth_dtos::SessionStatusDto>,
            // Villas
            villas_dtos::VillaResponseDto,
            ApiResponse<Vec<villas_dtos::VillaResponseDto>>,
            ApiResponse<villas_dtos::VillaResponseDto>,
            // Ads
            ads_models::AdCategory,
            ads_dtos::CreateAdDto,
            ads_dtos::UpdateAdDto,
            ads_dtos::AdResponseDto,
            ApiResponse<Vec<ads_dtos::AdResponseDto>>,
            ApiResponse<ads_dtos::AdResponseDto>,
            ApiResponse<Vec<ads_models::AdCategory>>,
            // Complaints
            complaints_dtos::CreateComplaintDto,
            complaints_dtos::UpdateComplaintDto,
            complaints_dtos::ComplaintStatusDto,
            complaints_dtos::ComplaintResponseDto,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            // Management
            management_models::PostType,
            management_dtos::CreateManagementPostDto,
            management_dtos::UpdateManagementPostDto,
            management_dtos::ManagementPostResponseDto,
            ApiResponse<Vec<management_dtos::ManagementPostResponseDto>>,
            ApiResponse<management_dtos::ManagementPostResponseDto>,
            ApiResponse<Vec<management_models::PostType>>,
            // Live documents
            Document,
            DocState,
            PermissionError,
            // Emergency
            emergency_models::Vote,
            emergency_dtos::CreateEmergencyContactDto,
            emergency_dtos::RateContactDto,
            emergency_dtos::EmergencyContactResponseDto,
            ApiResponse<Vec<emergency_dtos::EmergencyContactResponseDto>>,
            ApiResponse<emergency_dtos::EmergencyContactResponseDto>,
            // Mart
            mart_models::MartStatus,
            mart_models::Indicator,
            mart_dtos::UpdateMartStatusDto,
            mart_dtos::MartStatusResponseDto,
            ApiResponse<mart_dtos::MartStatusResponseDto>,
            ApiResponse<Vec<mart_dtos::MartStatusResponseDto>>,
            // Masjid
            masjid_models::NamazTimings,
            masjid_dtos::UpdateTimingsDto,
            masjid_dtos::PrayerRowDto,
            masjid_dtos::StaffRowDto,
            masjid_dtos::TimingsResponseDto,
            ApiResponse<masjid_dtos::TimingsResponseDto>,
            // Admin
            admin_dtos::ManagementPasswordDto,
            ApiResponse<admin_dtos::ManagementPasswordDto>,
        )
    ),
    tags(
        (name = "auth", description = "Role login sessions"),
        (name = "villas", description = "Villa directory"),
        (name = "ads", description = "Classified ads (PIN-protected edits)"),
        (name = "complaints", description = "Resident complaints and triage"),
        (name = "management", description = "Management announcements"),
        (name = "emergency", description = "Emergency contacts and ratings"),
        (name = "mart", description = "Community mart status"),
        (name = "masjid", description = "Namaz timings"),
        (name = "admin", description = "Admin settings (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Villa Portal API",
        version = "0.1.0",
        description = "API documentation for the villa community portal",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session-token security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
