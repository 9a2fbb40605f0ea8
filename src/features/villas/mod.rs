//! Villa directory.
//!
//! The directory is a static data file loaded at startup; villa numbers are
//! normalized before every lookup.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/villas` | No | Search by category, street, block or text |
//! | GET | `/api/villas/{number}` | No | One villa |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{normalize_villa_number, VillaService};
