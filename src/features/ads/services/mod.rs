mod ad_service;

pub use ad_service::{active_ads, AdService};
