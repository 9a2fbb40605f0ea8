mod management_handler;

pub use management_handler::*;
