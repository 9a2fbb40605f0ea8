//! Document store used by the real-time revision
//!
//! A collection/document API with a change feed. [`DocSubscription`] follows a
//! single document and republishes its state on every change; read failures
//! are reported once to the process-wide [`ErrorEmitter`].

mod events;
mod memory;
mod postgres;
mod store;
mod subscription;

pub use events::{spawn_error_reporter, ErrorEmitter, PermissionError};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{ChangeFeed, Document, DocumentRef, DocumentStore, StoreError};
pub use subscription::{DocState, DocSubscription};
