mod mart_handler;

pub use mart_handler::*;
