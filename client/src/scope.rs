use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::oneshot;
use tokio::task::AbortHandle;

/// Owns the tasks started on behalf of one view. Dropping the scope aborts
/// them, and anything they produced afterwards is discarded.
#[derive(Debug)]
pub struct ViewScope {
    name: &'static str,
    alive: Arc<AtomicBool>,
    tasks: Vec<AbortHandle>,
}

/// Result of a task spawned in a [`ViewScope`].
#[derive(Debug)]
pub struct Pending<T> {
    alive: Arc<AtomicBool>,
    rx: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    /// `None` once the owning scope was torn down.
    pub async fn resolve(self) -> Option<T> {
        let value = self.rx.await.ok()?;
        self.alive.load(Ordering::Acquire).then_some(value)
    }
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            alive: Arc::new(AtomicBool::new(true)),
            tasks: Vec::new(),
        }
    }

    pub fn spawn<F>(&mut self, future: F) -> Pending<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());

        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let _ = tx.send(future.await);
        });
        self.tasks.push(handle.abort_handle());

        Pending {
            alive: Arc::clone(&self.alive),
            rx,
        }
    }

    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        let mut aborted = 0;
        for task in self.tasks.iter().filter(|task| !task.is_finished()) {
            task.abort();
            aborted += 1;
        }
        if aborted > 0 {
            tracing::debug!(view = self.name, aborted, "view torn down with pending tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pending_resolves_while_scope_alive() {
        let mut scope = ViewScope::new("test");
        let pending = scope.spawn(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            42
        });
        assert_eq!(pending.resolve().await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_discards_late_result() {
        let mut scope = ViewScope::new("test");
        let pending = scope.spawn(async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            "late"
        });
        assert_eq!(scope.active_tasks(), 1);
        drop(scope);
        assert_eq!(pending.resolve().await, None);
    }

    #[tokio::test]
    async fn test_finished_result_is_dropped_after_teardown() {
        let mut scope = ViewScope::new("test");
        let pending = scope.spawn(async { 7 });
        tokio::task::yield_now().await;
        while scope.active_tasks() > 0 {
            tokio::task::yield_now().await;
        }
        drop(scope);
        assert_eq!(pending.resolve().await, None);
    }
}
