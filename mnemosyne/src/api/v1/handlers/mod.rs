pub mod analytics;
pub(crate) mod health;
pub mod memories;
pub mod query;

pub use health::health_check;

use crate::api::AppState;
use crate::error::{MnemosyneError, Result};
use crate::services::MemoryService;

/// Run a store-touching service call off the async runtime.
pub(crate) async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&MemoryService) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let memory = state.memory.clone();
    tokio::task::spawn_blocking(move || f(&memory))
        .await
        .map_err(|e| MnemosyneError::Internal(format!("Blocking task failed: {e}")))?
}
