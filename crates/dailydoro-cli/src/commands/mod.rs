pub mod config;
pub mod export;
pub mod history;
pub mod run;
pub mod task;

use dailydoro_core::{Database, KvStore, MemoryStore};

/// Open the persisted store, falling back to memory when it is unavailable.
pub(crate) fn open_store() -> Box<dyn KvStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %e, "storage unavailable, changes will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}
