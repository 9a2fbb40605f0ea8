mod ad_dto;

pub use ad_dto::{AdListQueryDto, AdPayload, AdResponseDto, CreateAdDto, UpdateAdDto};
