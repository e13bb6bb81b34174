use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use crate::controllers::save_items;
use crate::models::ShoppingItem;
use crate::storage::KeyValueStore;

enum SaveCommand {
    Save(Vec<ShoppingItem>),
    Flush(oneshot::Sender<()>),
}

/// Background writer for list snapshots
///
/// Snapshots are written one at a time in the order they were queued, so
/// the most recent snapshot is always the one left in the store.
pub struct SaveWorker {
    tx: mpsc::UnboundedSender<SaveCommand>,
}

impl SaveWorker {
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    SaveCommand::Save(items) => match save_items(store.as_ref(), &items).await {
                        Ok(()) => debug!(count = items.len(), "Saved shopping items"),
                        Err(e) => error!("Failed to save items: {}", e),
                    },
                    SaveCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        Self { tx }
    }

    /// Queue a snapshot for writing; never blocks and never fails
    pub fn save(&self, items: &[ShoppingItem]) {
        if self.tx.send(SaveCommand::Save(items.to_vec())).is_err() {
            warn!("Save worker has stopped, snapshot dropped");
        }
    }

    /// Wait until every snapshot queued so far has been written
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(SaveCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}
