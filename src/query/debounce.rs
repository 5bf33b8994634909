//! Quiet-period settling for rapidly changing values.
//!
//! Search input changes on every keystroke; issuing a request per keystroke
//! would flood the backend. A [`Debouncer`] hands each candidate value a
//! token and lets it sleep out the quiet period; a value whose token has
//! been superseded by the time it wakes is dropped, so only the most recent
//! value within a settling window is ever observed downstream.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Restartable quiet-period timer.
///
/// Cloning shares the epoch counter, so clones supersede each other: the
/// console clones one debouncer into every async search handler.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    epoch: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet period for `value`.
    ///
    /// Returns `Some(value)` if no newer call started while sleeping,
    /// `None` if this value was superseded. Intermediate values are never
    /// returned; after a burst of calls, exactly the last one settles.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.epoch.load(Ordering::SeqCst) == token {
            Some(value)
        } else {
            None
        }
    }

    /// Token of the most recent `settle` call. Exposed for state layers
    /// that track settling epochs themselves.
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_single_value_settles_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        let settled = debouncer.settle("j").await;
        assert_eq!(settled, Some("j"));
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_only_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(500));

        // Five keystrokes, 50ms apart, spelling out "john"
        let mut tasks = Vec::new();
        for prefix in ["j", "jo", "joh", "john", "john"] {
            let debouncer = debouncer.clone();
            tasks.push(tokio::spawn(
                async move { debouncer.settle(prefix).await },
            ));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let mut settled = Vec::new();
        for task in tasks {
            if let Some(value) = task.await.unwrap() {
                settled.push(value);
            }
        }

        // Exactly one value survives, and it is the final input
        assert_eq!(settled, vec!["john"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_typing_settles_each_value() {
        let debouncer = Debouncer::new(Duration::from_millis(100));

        let first = debouncer.settle("a").await;
        let second = debouncer.settle("ab").await;

        assert_eq!(first, Some("a"));
        assert_eq!(second, Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_value_returns_none() {
        let debouncer = Debouncer::new(Duration::from_millis(500));

        let stale = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("stale").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let fresh = debouncer.settle("fresh").await;

        assert_eq!(stale.await.unwrap(), None);
        assert_eq!(fresh, Some("fresh"));
    }
}
