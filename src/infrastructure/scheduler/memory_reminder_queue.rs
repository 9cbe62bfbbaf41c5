use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::entities::{Reminder, ScheduledReminder};
use crate::domain::repositories::{ReminderScheduler, SchedulerError};

#[derive(Debug, Default)]
struct QueueState {
    // reverse so that BinaryHeap (max-heap) behaves as a min-heap
    heap: BinaryHeap<Reverse<ScheduledReminder>>,
    // item id -> generation of its live entry; anything else in the heap is stale
    live: HashMap<Uuid, u64>,
    // popped entries whose delivery has not finished yet
    in_flight: HashMap<Uuid, u64>,
    next_generation: u64,
}

impl QueueState {
    fn is_live(&self, entry: &ScheduledReminder) -> bool {
        self.live.get(&entry.item_id()) == Some(&entry.generation)
    }

    // drop replaced/cancelled entries sitting on top of the heap
    fn prune(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }
}

/// In-memory reminder queue ordered by fire time.
///
/// Replacing or cancelling only updates the live generation map; stale heap entries are
/// discarded lazily when they reach the top.
#[derive(Debug)]
pub struct MemoryReminderQueue {
    state: Mutex<QueueState>,
    // notifies a sleeping dispatcher that the earliest reminder may have changed
    wakeup_sender: broadcast::Sender<()>,
}

impl MemoryReminderQueue {
    pub fn new() -> Self {
        let (wakeup_sender, _) = broadcast::channel(1);
        Self {
            state: Mutex::new(QueueState::default()),
            wakeup_sender,
        }
    }

    /// Get a receiver for wake-up notifications
    pub fn subscribe_wakeup(&self) -> broadcast::Receiver<()> {
        self.wakeup_sender.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueueState>, SchedulerError> {
        self.state
            .lock()
            .map_err(|_| SchedulerError::Unavailable("reminder queue lock poisoned".to_string()))
    }

    /// Earliest live reminder without removing it
    pub fn peek_next(&self) -> Result<Option<ScheduledReminder>, SchedulerError> {
        let mut state = self.lock()?;
        state.prune();
        Ok(state.heap.peek().map(|Reverse(entry)| entry.clone()))
    }

    /// Removes and returns the earliest live reminder if it is due at `now`.
    /// The entry stays in flight until `finish_delivery`; scheduling or cancelling the same
    /// item meanwhile withdraws it.
    pub fn pop_due(
        &self,
        now: NaiveDateTime,
    ) -> Result<Option<ScheduledReminder>, SchedulerError> {
        let mut state = self.lock()?;
        state.prune();

        let due = matches!(state.heap.peek(), Some(Reverse(top)) if top.fire_at() <= now);
        if !due {
            return Ok(None);
        }

        let Some(Reverse(entry)) = state.heap.pop() else {
            return Ok(None);
        };
        state.live.remove(&entry.item_id());
        state.in_flight.insert(entry.item_id(), entry.generation);
        Ok(Some(entry))
    }

    /// Whether a popped entry is still wanted, i.e. was neither cancelled nor replaced
    pub fn is_in_flight(&self, entry: &ScheduledReminder) -> Result<bool, SchedulerError> {
        let state = self.lock()?;
        Ok(state.in_flight.get(&entry.item_id()) == Some(&entry.generation))
    }

    /// Ends the delivery of a popped entry. Returns false when the item was cancelled or
    /// re-armed while it was in flight, in which case no follow-up should be scheduled.
    pub fn finish_delivery(&self, entry: &ScheduledReminder) -> Result<bool, SchedulerError> {
        let mut state = self.lock()?;
        if state.in_flight.get(&entry.item_id()) == Some(&entry.generation) {
            state.in_flight.remove(&entry.item_id());
            return Ok(true);
        }
        Ok(false)
    }

    /// Reminder currently armed for `item_id`
    pub fn pending_for(&self, item_id: Uuid) -> Result<Option<Reminder>, SchedulerError> {
        let state = self.lock()?;
        Ok(state
            .heap
            .iter()
            .map(|Reverse(entry)| entry)
            .find(|entry| entry.item_id() == item_id && state.is_live(entry))
            .map(|entry| entry.reminder.clone()))
    }

    pub fn pending_count(&self) -> Result<usize, SchedulerError> {
        Ok(self.lock()?.live.len())
    }
}

impl Default for MemoryReminderQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderScheduler for MemoryReminderQueue {
    fn schedule(&self, reminder: Reminder) -> Result<(), SchedulerError> {
        {
            let mut state = self.lock()?;
            state.next_generation += 1;
            let generation = state.next_generation;
            state.live.insert(reminder.item_id, generation);
            state.in_flight.remove(&reminder.item_id);
            state
                .heap
                .push(Reverse(ScheduledReminder::new(reminder, generation)));
        }
        // no receiver just means no dispatcher is running yet
        let _ = self.wakeup_sender.send(());
        Ok(())
    }

    fn cancel(&self, item_id: Uuid) -> Result<(), SchedulerError> {
        let mut state = self.lock()?;
        state.live.remove(&item_id);
        state.in_flight.remove(&item_id);
        state.prune();
        Ok(())
    }
}
