//! Classified ads.
//!
//! Ads expire a fixed number of hours after posting and disappear from the
//! list once expired. Each ad carries a 4-digit PIN chosen by its poster.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/ads` | No | Active ads, optional `category` |
//! | GET | `/api/ads/categories` | No | Category list |
//! | POST | `/api/ads` | No | Post an ad |
//! | PUT | `/api/ads/{id}` | PIN or admin | Edit an ad |
//! | DELETE | `/api/ads/{id}` | PIN or admin | Delete an ad |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdService;
