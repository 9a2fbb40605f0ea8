use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use utoipa::ToSchema;

use super::events::{ErrorEmitter, PermissionError};
use super::store::{Document, DocumentRef, DocumentStore};

/// Snapshot of a followed document
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocState {
    pub data: Option<Document>,
    pub is_loading: bool,
    pub error: Option<PermissionError>,
}

impl DocState {
    fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

/// Follows at most one document at a time.
///
/// Pointing it at a new [`DocumentRef`] tears down the previous listener;
/// pointing it at the same ref again is a no-op. Dropping the subscription
/// stops the listener.
pub struct DocSubscription {
    store: Arc<dyn DocumentStore>,
    emitter: ErrorEmitter,
    current: Option<DocumentRef>,
    task: Option<JoinHandle<()>>,
    state: watch::Sender<DocState>,
}

impl DocSubscription {
    pub fn new(store: Arc<dyn DocumentStore>, emitter: ErrorEmitter) -> Self {
        let (state, _rx) = watch::channel(DocState::idle());
        Self {
            store,
            emitter,
            current: None,
            task: None,
            state,
        }
    }

    pub fn state(&self) -> watch::Receiver<DocState> {
        self.state.subscribe()
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&DocumentRef> {
        self.current.as_ref()
    }

    pub fn watch(&mut self, doc: Option<DocumentRef>) {
        if doc.is_some() && doc == self.current {
            return;
        }

        self.stop();
        self.current = doc.clone();

        let Some(doc) = doc else {
            self.state.send_replace(DocState::idle());
            return;
        };

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let store = Arc::clone(&self.store);
        let emitter = self.emitter.clone();
        let state = self.state.clone();
        self.task = Some(tokio::spawn(follow(store, emitter, state, doc)));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for DocSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn follow(
    store: Arc<dyn DocumentStore>,
    emitter: ErrorEmitter,
    state: watch::Sender<DocState>,
    doc: DocumentRef,
) {
    let path = doc.path();
    // Subscribe before the first read so a write in between is not missed
    let mut changes = store.changes();

    loop {
        match store.get(&doc).await {
            Ok(data) => {
                state.send_replace(DocState {
                    data,
                    is_loading: false,
                    error: None,
                });
            }
            Err(e) => {
                tracing::debug!("Subscription to {} failed: {}", path, e);
                let error = PermissionError::new("get", path.clone());
                state.send_replace(DocState {
                    data: None,
                    is_loading: false,
                    error: Some(error.clone()),
                });
                emitter.emit(error);
                return;
            }
        }

        loop {
            match changes.recv().await {
                Ok(changed) if changed == path => break,
                Ok(_) => continue,
                // Missed events may include ours; re-read to be safe
                Err(broadcast::error::RecvError::Lagged(_)) => break,
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }
}
