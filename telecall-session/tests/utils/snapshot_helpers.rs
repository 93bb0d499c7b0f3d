use anyhow::{Context, Result};
use std::time::Duration;
use telecall_session::{CallHandle, CallSnapshot};

/// Timeout for snapshot observations (ms).
pub const SNAPSHOT_TIMEOUT_MS: u64 = 5000;

/// Wait until the call snapshot satisfies the predicate.
pub async fn wait_for_snapshot<F>(handle: &CallHandle, mut predicate: F) -> Result<CallSnapshot>
where
    F: FnMut(&CallSnapshot) -> bool,
{
    let mut watch = handle.watch();
    tokio::time::timeout(Duration::from_millis(SNAPSHOT_TIMEOUT_MS), async move {
        loop {
            {
                let snapshot = watch.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            watch
                .changed()
                .await
                .expect("call actor stopped while waiting for snapshot");
        }
    })
    .await
    .context("timed out waiting for call snapshot")
}

/// Poll a condition until it holds or the timeout elapses.
pub async fn wait_until<F>(mut check: F) -> Result<()>
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(Duration::from_millis(SNAPSHOT_TIMEOUT_MS), async move {
        loop {
            if check() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .context("timed out waiting for condition")
}

/// Give background work a moment to (not) happen before asserting absence.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}
