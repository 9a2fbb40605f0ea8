//! Management announcements.
//!
//! Posts live either in the spreadsheet or in the document store, chosen by
//! `MANAGEMENT_POSTS_BACKEND`. The document store backend also serves a live
//! stream of a single post.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/management/posts` | No | All posts, newest first |
//! | GET | `/api/management/posts/{id}` | No | One post |
//! | GET | `/api/management/posts/{id}/stream` | No | SSE of the post's state |
//! | GET | `/api/management/post-types` | No | Post type list |
//! | POST | `/api/management/posts` | Management | Publish |
//! | PUT | `/api/management/posts/{id}` | Management | Edit (merge) |
//! | DELETE | `/api/management/posts/{id}` | Management | Delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ManagementService;
