mod management_service;
mod post_repository;

pub use management_service::ManagementService;
pub use post_repository::{DocumentPostRepository, ManagementPostRepository, SheetPostRepository};
