mod complaint_dto;

pub use complaint_dto::{
    ComplaintPayload, ComplaintResponseDto, ComplaintStatusDto, CreateComplaintDto,
    UpdateComplaintDto,
};
