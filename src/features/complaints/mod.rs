//! Resident complaints.
//!
//! Residents file complaints against their villa and protect them with a
//! 4-digit PIN. Management marks them noted and resolved.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/complaints` | No | All complaints |
//! | POST | `/api/complaints` | No | File a complaint |
//! | PUT | `/api/complaints/{id}` | PIN or admin | Edit a complaint |
//! | DELETE | `/api/complaints/{id}` | PIN or admin | Delete a complaint |
//! | PATCH | `/api/complaints/{id}/status` | Management | Set noted / resolved |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ComplaintService;
