mod mart_dto;

pub use mart_dto::{MartStatusResponseDto, UpdateMartStatusDto};
