use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Owner of background work tied to one screen or command.
///
/// Every task spawned through the scope races its future against the
/// scope's [`CancellationToken`]. Cancelling the scope, or dropping it, stops
/// those tasks at their next await point, so nothing they would have written
/// lands after the owner is gone.
#[derive(Debug, Default)]
pub struct TaskScope {
    token: CancellationToken,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled together with this scope. Cancelling the child alone
    /// leaves the scope and its other tasks running.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Spawns `future` on the runtime. The handle resolves to `None` when the
    /// scope was cancelled before the future finished.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<Option<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                output = future => Some(output),
            }
        })
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!("Task scope cancelled");
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_completes() {
        let scope = TaskScope::new();
        let handle = scope.spawn(async { 7 });
        assert_eq!(handle.await.unwrap(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_pending_work() {
        let landed = Arc::new(AtomicBool::new(false));
        let scope = TaskScope::new();
        let flag = landed.clone();
        let handle = scope.spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            flag.store(true, Ordering::SeqCst);
        });

        drop(scope);
        assert_eq!(handle.await.unwrap(), None);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!landed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_child_token_follows_scope() {
        let scope = TaskScope::new();
        let child = scope.child_token();
        child.cancel();
        assert!(!scope.is_cancelled());

        let second = scope.child_token();
        scope.cancel();
        assert!(second.is_cancelled());
    }
}
