//! Masjid namaz timings and staff.
//!
//! Held in memory only; a restart brings back the default timings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/masjid/timings` | No | Raw timings plus display rows |
//! | PUT | `/api/masjid/timings` | Admin | Replace the timings |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MasjidService;
