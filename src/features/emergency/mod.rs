//! Emergency contacts directory with like/dislike ratings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/emergency-contacts` | No | All contacts |
//! | POST | `/api/emergency-contacts` | Admin | Add a contact |
//! | POST | `/api/emergency-contacts/{id}/rating` | No | Like or dislike |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EmergencyService;
