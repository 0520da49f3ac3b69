use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::data::{DataStore, Snapshot};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<DataStore>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        AppState {
            store: Arc::new(Mutex::new(DataStore::new(data_dir))),
        }
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.store.lock().await.load()
    }

    /// Directory the store reads from, and uploads write to.
    pub async fn data_dir(&self) -> PathBuf {
        self.store.lock().await.data_dir().to_path_buf()
    }
}
