//! Features layer - one slice per portal section
//!
//! Each slice owns its DTOs, models, services, handlers and routes.

pub mod admin;
pub mod ads;
pub mod auth;
pub mod complaints;
pub mod emergency;
pub mod management;
pub mod mart;
pub mod masjid;
pub mod villas;
