use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use utoipa::ToSchema;

const EMITTER_CAPACITY: usize = 64;

/// Contextual error raised when a document read is refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, thiserror::Error)]
#[error("Missing or insufficient permissions: {operation} on {path}")]
pub struct PermissionError {
    pub operation: String,
    pub path: String,
}

impl PermissionError {
    pub fn new(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            path: path.into(),
        }
    }
}

/// Process-wide sink for permission errors. Cloned into whatever needs to
/// report; a single reporter task drains it.
#[derive(Clone)]
pub struct ErrorEmitter {
    tx: broadcast::Sender<PermissionError>,
}

impl ErrorEmitter {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EMITTER_CAPACITY);
        Self { tx }
    }

    pub fn emit(&self, error: PermissionError) {
        // No listener is not an error; the event is simply dropped
        let _ = self.tx.send(error);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PermissionError> {
        self.tx.subscribe()
    }
}

impl Default for ErrorEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains the emitter into the log.
pub fn spawn_error_reporter(emitter: &ErrorEmitter) -> JoinHandle<()> {
    let mut rx = emitter.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(err) => tracing::error!(
                    operation = %err.operation,
                    path = %err.path,
                    "permission-error: {}",
                    err
                ),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Error reporter lagged, {} events skipped", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
