//! Poll a server task until it is terminal

use super::types::Task;
use crate::config::PollingSettings;
use crate::sdk::errors::{Result, fallback};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Looks up the current state of a task
#[async_trait]
pub trait StatusFetcher: Send + Sync + 'static {
    async fn fetch_status(&self, task_id: &str) -> Result<Task>;
}

#[async_trait]
impl<F, Fut> StatusFetcher for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Task>> + Send + 'static,
{
    async fn fetch_status(&self, task_id: &str) -> Result<Task> {
        (self)(task_id.to_string()).await
    }
}

/// Poll interval and hard deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Rename/reorder processing: every 3 s, up to 10 min
    pub fn processing() -> Self {
        Self::for_processing(&PollingSettings::default())
    }

    /// Semantic reorder: every 2 s, up to 5 min
    pub fn reorder() -> Self {
        Self::for_reorder(&PollingSettings::default())
    }

    pub fn for_processing(settings: &PollingSettings) -> Self {
        Self::new(settings.process_interval(), settings.process_timeout())
    }

    pub fn for_reorder(settings: &PollingSettings) -> Self {
        Self::new(settings.reorder_interval(), settings.reorder_timeout())
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::processing()
    }
}

/// How a poll ended
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Server reported `completed`
    Completed(Task),
    /// Server reported `failed`, or a status fetch failed
    Failed(Task),
    /// Deadline passed without a terminal state
    TimedOut(Task),
    /// Cancelled through the handle
    Cancelled,
}

impl PollOutcome {
    /// Task delivered to `on_terminal`, if any
    pub fn task(&self) -> Option<&Task> {
        match self {
            PollOutcome::Completed(task)
            | PollOutcome::Failed(task)
            | PollOutcome::TimedOut(task) => Some(task),
            PollOutcome::Cancelled => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PollOutcome::Completed(_))
    }
}

#[derive(Debug, Default)]
struct CancelSignal {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelSignal {
    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
            // Stored permit for a waiter that has not registered yet
            self.notify.notify_one();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        while !self.is_cancelled() {
            self.notify.notified().await;
        }
    }
}

/// Handle to a running poll. Dropping it cancels the poll.
#[derive(Debug)]
pub struct PollHandle {
    task_id: String,
    signal: Arc<CancelSignal>,
    join: Option<JoinHandle<PollOutcome>>,
}

impl PollHandle {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Stop polling. No callback fires afterwards. Idempotent, and a no-op
    /// once the poll has ended on its own.
    pub fn cancel(&self) {
        self.signal.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |join| join.is_finished())
    }

    /// Wait for the poll to end
    pub async fn wait(mut self) -> PollOutcome {
        let Some(join) = self.join.take() else {
            return PollOutcome::Cancelled;
        };
        match join.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Polling task for {} aborted: {}", self.task_id, e);
                PollOutcome::Cancelled
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if self.join.as_ref().is_some_and(|join| !join.is_finished()) {
            self.signal.cancel();
        }
    }
}

/// Watches server tasks on a fixed interval with a hard deadline
#[derive(Debug, Clone, Default)]
pub struct TaskPoller {
    options: PollOptions,
}

impl TaskPoller {
    pub fn new(options: PollOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    /// Start polling `task_id` on the current tokio runtime.
    ///
    /// `on_update` sees every successfully fetched task, terminal ones
    /// included. `on_terminal` runs once: on the first `completed` or
    /// `failed` status, on a fetch error, or at the deadline (the last two
    /// with a synthetic failed task). Neither runs after cancellation.
    ///
    /// A zero interval ends the poll at once as `Failed`, without fetching.
    pub fn start<F, U, T>(
        &self,
        task_id: impl Into<String>,
        fetcher: F,
        on_update: U,
        on_terminal: T,
    ) -> PollHandle
    where
        F: StatusFetcher,
        U: Fn(&Task) + Send + 'static,
        T: FnOnce(Task) + Send + 'static,
    {
        let task_id = task_id.into();
        let signal = Arc::new(CancelSignal::default());

        info!(
            "Polling task {} every {:?} (timeout {:?})",
            task_id, self.options.interval, self.options.timeout
        );

        let join = tokio::spawn(run(
            task_id.clone(),
            self.options,
            fetcher,
            on_update,
            on_terminal,
            signal.clone(),
        ));

        PollHandle {
            task_id,
            signal,
            join: Some(join),
        }
    }
}

async fn run<F, U, T>(
    task_id: String,
    options: PollOptions,
    fetcher: F,
    on_update: U,
    on_terminal: T,
    signal: Arc<CancelSignal>,
) -> PollOutcome
where
    F: StatusFetcher,
    U: Fn(&Task) + Send + 'static,
    T: FnOnce(Task) + Send + 'static,
{
    if options.interval.is_zero() {
        warn!("Refusing to poll task {} with a zero interval", task_id);
        let task = Task::failed(
            task_id.as_str(),
            "Intervalo de consulta inválido: debe ser mayor que cero",
        );
        on_terminal(task.clone());
        return PollOutcome::Failed(task);
    }

    let deadline = tokio::time::sleep(options.timeout);
    tokio::pin!(deadline);

    // First poll one interval after start; a slow fetch delays the next
    // tick instead of stacking calls.
    let mut ticker = tokio::time::interval_at(Instant::now() + options.interval, options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut polls: u32 = 0;

    loop {
        let poll = async {
            ticker.tick().await;
            fetcher.fetch_status(&task_id).await
        };

        let result = tokio::select! {
            biased;
            _ = signal.cancelled() => {
                debug!("Polling of task {} cancelled after {} polls", task_id, polls);
                return PollOutcome::Cancelled;
            }
            _ = &mut deadline => {
                warn!("Task {} not finished after {:?}, giving up", task_id, options.timeout);
                let task = Task::failed(
                    task_id.as_str(),
                    format!(
                        "Tiempo de espera agotado ({:?}) sin respuesta final del servidor",
                        options.timeout
                    ),
                );
                on_terminal(task.clone());
                return PollOutcome::TimedOut(task);
            }
            result = poll => result,
        };

        polls += 1;

        if signal.is_cancelled() {
            debug!("Discarding status of cancelled task {}", task_id);
            return PollOutcome::Cancelled;
        }

        match result {
            Err(e) => {
                warn!("Status fetch for task {} failed: {}", task_id, e);
                let task = Task::failed(task_id.as_str(), e.user_message(fallback::PROCESS_STATUS));
                on_terminal(task.clone());
                return PollOutcome::Failed(task);
            }
            Ok(mut task) => {
                if task.task_id.is_empty() {
                    task.task_id = task_id.clone();
                }
                debug!(
                    "Task {} poll #{}: {:?} {}%",
                    task_id,
                    polls,
                    task.status,
                    task.percent()
                );

                on_update(&task);

                if task.is_terminal() {
                    info!("Task {} finished with status {:?}", task_id, task.status);
                    on_terminal(task.clone());
                    return if task.is_completed() {
                        PollOutcome::Completed(task)
                    } else {
                        PollOutcome::Failed(task)
                    };
                }
            }
        }
    }
}
