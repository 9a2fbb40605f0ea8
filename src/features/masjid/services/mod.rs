mod masjid_service;

pub use masjid_service::MasjidService;
