//! Fire-and-forget dispatch for tracking calls.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ClientResult;

/// Handle to a detached best-effort call.
///
/// Carries no outcome: failures are logged and dropped inside the task.
/// Dropping the handle leaves the call running.
#[derive(Debug)]
#[must_use = "drop the handle explicitly to make the detach visible"]
pub struct BestEffort {
    handle: Option<JoinHandle<()>>,
}

impl BestEffort {
    /// Run `call` on the current tokio runtime without awaiting it.
    ///
    /// Outside a runtime the call is skipped with a warning.
    pub(crate) fn spawn<F>(operation: &'static str, call: F) -> Self
    where
        F: Future<Output = ClientResult<()>> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!(operation, "No async runtime available, skipping best-effort call");
            return Self { handle: None };
        };

        let handle = runtime.spawn(async move {
            match call.await {
                Ok(()) => debug!(operation, "Best-effort call completed"),
                Err(e) => warn!(operation, error = %e, "Best-effort call failed, ignoring"),
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Whether the call was handed to a runtime.
    #[must_use]
    pub fn was_dispatched(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the call to finish, whatever its outcome.
    ///
    /// For shutdown paths that want in-flight tracking calls to drain.
    pub async fn settled(self) {
        if let Some(handle) = self.handle {
            // A panicked or cancelled task is as ignorable as a failed call.
            let _ = handle.await;
        }
    }
}
