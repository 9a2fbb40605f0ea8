mod villa_service;

pub use villa_service::{normalize_villa_number, VillaService};
