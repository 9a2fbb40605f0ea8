mod masjid_handler;

pub use masjid_handler::*;
