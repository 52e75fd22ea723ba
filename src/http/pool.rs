use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::error;

const OUTCOME_CHANNEL_CAPACITY: usize = 1024;

/// Hands out a fixed number of task slots across workers.
pub(crate) struct RequestBudget(AtomicU64);

impl RequestBudget {
    pub(crate) fn new(total: u64) -> Self {
        Self(AtomicU64::new(total))
    }

    /// Claims one slot; returns false once the budget is exhausted.
    pub(crate) fn try_claim(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }
}

/// Runs `requests` executions of `task` across exactly `workers` concurrent
/// tasks and collects every outcome.
///
/// Workers loop claiming slots from a shared budget and funnel outcomes
/// through one channel, the only synchronization point between tasks, so the
/// returned collection holds exactly one entry per completed execution in
/// completion order. The call returns only after the channel has drained and
/// every worker has joined; a failing task never terminates the pool.
pub async fn run<T, F, Fut>(requests: u64, workers: usize, task: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Clone + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let budget = Arc::new(RequestBudget::new(requests));
    let (outcome_tx, mut outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let budget = Arc::clone(&budget);
        let outcome_tx = outcome_tx.clone();
        let task = task.clone();
        handles.push(tokio::spawn(async move {
            while budget.try_claim() {
                let outcome = task().await;
                if outcome_tx.send(outcome).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(outcome_tx);

    let mut outcomes = Vec::with_capacity(usize::try_from(requests).unwrap_or(0));
    while let Some(outcome) = outcome_rx.recv().await {
        outcomes.push(outcome);
    }

    for handle in handles {
        if handle.await.is_err() {
            error!("A worker task panicked; its claimed slot produced no record.");
        }
    }

    outcomes
}
