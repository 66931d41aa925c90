use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::trace;

/// Trailing debounce with a max-wait cap.
///
/// Values passed to [`Debouncer::call`] are held in a pending slot. The latest one is sent to
/// the output channel once `wait` passes without a new call, or once `max_wait` has passed since
/// the first call of the pending run, whichever comes first. Dropping the debouncer aborts the
/// timer task and discards whatever is pending.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(wait: Duration, max_wait: Duration, out: mpsc::UnboundedSender<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(wait, max_wait, rx, out));
        Debouncer { tx, task }
    }

    pub fn call(&self, value: T) {
        // Only fails once the timer task is gone, at which point nothing should fire anyway
        let _ = self.tx.send(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(
    wait: Duration,
    max_wait: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    out: mpsc::UnboundedSender<T>,
) {
    while let Some(first) = rx.recv().await {
        let cap = Instant::now() + max_wait;
        let mut deadline = (Instant::now() + wait).min(cap);
        let mut latest = first;
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => {
                        latest = value;
                        deadline = (Instant::now() + wait).min(cap);
                    }
                    None => return,
                },
                _ = time::sleep_until(deadline) => break,
            }
        }
        trace!("debounce fired");
        if out.send(latest).is_err() {
            return;
        }
    }
}
