use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, warn};

use crate::application::clock::Clock;
use crate::application::reminder_planner;
use crate::domain::entities::{Reminder, ScheduledReminder};
use crate::domain::repositories::{ReminderScheduler, SchedulerError};
use crate::infrastructure::scheduler::memory_reminder_queue::MemoryReminderQueue;
use crate::infrastructure::scheduler::reminder_sink::ReminderSink;

const DEFAULT_IDLE_POLL: Duration = Duration::from_secs(300);
const ERROR_BACKOFF: Duration = Duration::from_secs(60);

/// Fires due reminders from a `MemoryReminderQueue` into a `ReminderSink`.
///
/// Sleeps until the earliest reminder is due, or until the queue signals a change.
/// Failed deliveries are retried after `retry_delay`; delivered repeating reminders are
/// chained to their next occurrence.
pub struct ReminderDispatcher {
    queue: Arc<MemoryReminderQueue>,
    sink: Arc<dyn ReminderSink>,
    clock: Arc<dyn Clock>,
    idle_poll: Duration,
    retry_delay: chrono::Duration,
}

impl ReminderDispatcher {
    pub fn new(
        queue: Arc<MemoryReminderQueue>,
        sink: Arc<dyn ReminderSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            queue,
            sink,
            clock,
            idle_poll: DEFAULT_IDLE_POLL,
            retry_delay: chrono::Duration::minutes(1),
        }
    }

    /// Upper bound on a single sleep
    pub fn with_idle_poll(mut self, idle_poll: Duration) -> Self {
        self.idle_poll = idle_poll;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: chrono::Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Spawns the dispatch loop. Reminders scheduled after this call wake it up.
    pub fn start(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let wakeup_receiver = self.queue.subscribe_wakeup();
        tokio::spawn(self.dispatch_loop(wakeup_receiver, shutdown))
    }

    /// Runs until `shutdown` becomes true or its sender is dropped
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        let wakeup_receiver = self.queue.subscribe_wakeup();
        self.dispatch_loop(wakeup_receiver, shutdown).await
    }

    async fn dispatch_loop(
        self,
        mut wakeup_receiver: broadcast::Receiver<()>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("Reminder dispatcher started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let wait = match self.dispatch_due().await {
                Ok(wait) => wait,
                Err(e) => {
                    error!("Reminder dispatch error: {}", e);
                    ERROR_BACKOFF
                }
            };

            tokio::select! {
                _ = sleep(wait) => {}
                _ = wakeup_receiver.recv() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Reminder dispatcher stopped");
    }

    /// Delivers every reminder due now and returns how long to sleep before the next one.
    pub async fn dispatch_due(&self) -> Result<Duration, SchedulerError> {
        loop {
            let now = self.clock.now();

            if let Some(entry) = self.queue.pop_due(now)? {
                self.deliver(entry, now).await?;
                continue;
            }

            let wait = match self.queue.peek_next()? {
                Some(next) => (next.fire_at() - now)
                    .to_std()
                    .unwrap_or(Duration::from_secs(1))
                    .min(self.idle_poll),
                None => self.idle_poll,
            };
            return Ok(wait);
        }
    }

    // A cancel that lands while the sink is awaited cannot recall that delivery; it only
    // suppresses the retry or the chained follow-up.
    async fn deliver(
        &self,
        entry: ScheduledReminder,
        now: chrono::NaiveDateTime,
    ) -> Result<(), SchedulerError> {
        if !self.queue.is_in_flight(&entry)? {
            debug!("Reminder for todo {} withdrawn before delivery", entry.item_id());
            return Ok(());
        }

        let reminder = &entry.reminder;
        let follow_up = match self.sink.deliver(reminder).await {
            Ok(()) => {
                debug!("Delivered reminder for todo {}", reminder.item_id);
                reminder_planner::chain_next(reminder, now)
            }
            Err(e) => {
                warn!(
                    "Failed to deliver reminder for todo {}, retrying: {}",
                    reminder.item_id, e
                );
                Some(Reminder {
                    fire_at: now + self.retry_delay,
                    ..reminder.clone()
                })
            }
        };

        // the store may have cancelled or re-armed the item meanwhile; its decision wins
        if !self.queue.finish_delivery(&entry)? {
            debug!("Reminder for todo {} changed during delivery", reminder.item_id);
            return Ok(());
        }
        if let Some(next) = follow_up {
            self.queue.schedule(next)?;
        }
        Ok(())
    }
}
