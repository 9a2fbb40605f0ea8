//! Admin-only settings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/management-password` | Admin | Current management password |
//! | PUT | `/api/admin/management-password` | Admin | Change it |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
