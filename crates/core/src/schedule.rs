//! Deferred tasks on a virtual clock.
//!
//! Settle delays are modelled as tasks that become due after a delay on a
//! clock the session moves forward. Every task carries the generation of the
//! game that scheduled it so a restart can drop, or later ignore, whatever the
//! previous game left behind.

use std::{collections::BTreeMap, time::Duration};

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A task that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    /// Handle the task was scheduled under.
    pub id: TaskId,
    /// Generation the task was scheduled for.
    pub generation: u64,
    /// Clock reading at which the task became due.
    pub at: Duration,
    /// The task payload.
    pub task: T,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u64,
    task: T,
}

/// Single-threaded queue of cancellable deferred tasks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<(Duration, TaskId), Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Empty scheduler with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no task is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue `task` to become due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, generation: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries
            .insert((self.now + delay, id), Entry { generation, task });
        id
    }

    /// Drop a pending task. Returns `false` when it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.entries.keys().find(|(_, task_id)| *task_id == id).copied();
        key.and_then(|key| self.entries.remove(&key)).is_some()
    }

    /// Drop every pending task of `generation`, returning how many were removed.
    pub fn cancel_generation(&mut self, generation: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.generation != generation);
        before - self.entries.len()
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Time from now until the earliest pending task is due.
    pub fn until_next(&self) -> Option<Duration> {
        self.entries
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Move the clock forward by `elapsed` and return the tasks that came due,
    /// earliest first and in scheduling order for equal due times.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Due<T>> {
        self.now += elapsed;
        let mut due = Vec::new();
        while let Some(entry) = self.entries.first_entry() {
            let (at, id) = *entry.key();
            if at > self.now {
                break;
            }
            let Entry { generation, task } = entry.remove();
            due.push(Due {
                id,
                generation,
                at,
                task,
            });
        }
        due
    }
}
