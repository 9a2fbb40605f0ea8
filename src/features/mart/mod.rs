//! Community mart open/closed indicator.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/mart/status` | No | Current status and indicator colour |
//! | GET | `/api/mart/statuses` | No | Every status with its colour |
//! | PUT | `/api/mart/status` | Mart owner | Change the status |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MartService;
