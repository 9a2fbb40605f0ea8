//! Role sessions for the portal.
//!
//! There are no user accounts: each role is unlocked with its own password and
//! the granted roles travel in a signed bearer token.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Unlock a role with its password |
//! | POST | `/api/auth/logout` | Optional | Drop a role from the session |
//! | GET | `/api/auth/session` | Optional | Current login flags |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AuthService, SessionTokenService};
