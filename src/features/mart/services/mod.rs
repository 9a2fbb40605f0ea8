mod mart_service;

pub use mart_service::MartService;
