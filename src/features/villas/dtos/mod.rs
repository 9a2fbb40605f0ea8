mod villa_dto;

pub use villa_dto::{VillaQueryDto, VillaResponseDto};
