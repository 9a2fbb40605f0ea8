//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the spreadsheet-script endpoint and the document
//! store used by the real-time revision.

pub mod documents;
pub mod sheet;
