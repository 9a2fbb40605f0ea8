mod mart_status;

pub use mart_status::{Indicator, MartStatus, MartStatusRow};
