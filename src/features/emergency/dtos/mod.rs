mod contact_dto;

pub use contact_dto::{
    CreateEmergencyContactDto, EmergencyContactPayload, EmergencyContactResponseDto,
    RateContactDto,
};
