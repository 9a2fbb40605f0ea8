mod post_dto;

pub use post_dto::{
    CreateManagementPostDto, ManagementPostPayload, ManagementPostResponseDto,
    UpdateManagementPostDto,
};
