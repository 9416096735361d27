use crate::model::card::Card;
use std::time::Duration;

/// Handle to a pending deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work the engine schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    BotPlay { seat: usize, card: Card },
    ResolveTrick,
    RestartRound,
}

#[derive(Debug, Clone)]
struct Pending {
    id: TaskId,
    scheduled_at: Duration,
    due: Duration,
    task: Deferred,
}

impl Pending {
    fn is_immediate(&self) -> bool {
        self.due == self.scheduled_at
    }
}

/// Deferred tasks ordered on a virtual clock.
///
/// Nothing fires on its own: the owner pulls due tasks with [`pop_due`].
/// [`invalidate_all`] drops every pending task, so a handle taken before the
/// call can no longer be cancelled or fired.
///
/// [`pop_due`]: Scheduler::pop_due
/// [`invalidate_all`]: Scheduler::invalidate_all
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: Deferred) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            scheduled_at: self.now,
            due: self.now + delay,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn invalidate_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn pending(&self) -> impl Iterator<Item = (TaskId, Deferred)> + '_ {
        self.pending.iter().map(|p| (p.id, p.task))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Id the next scheduled task will get. Every task already queued has a
    /// smaller one.
    pub fn next_task_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Removes the earliest task due at or before `until` and moves the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, Deferred)> {
        self.pop_where(until, |_| true)
    }

    /// Like [`pop_due`], but zero-delay tasks with an id at or past `boundary`
    /// stay queued. A driver that records [`next_task_id`] before its loop
    /// therefore cannot chase tasks that keep rescheduling at one instant.
    ///
    /// [`pop_due`]: Scheduler::pop_due
    /// [`next_task_id`]: Scheduler::next_task_id
    pub fn pop_due_before(
        &mut self,
        until: Duration,
        boundary: TaskId,
    ) -> Option<(TaskId, Deferred)> {
        self.pop_where(until, |p| p.id < boundary || !p.is_immediate())
    }

    fn pop_where(
        &mut self,
        until: Duration,
        eligible: impl Fn(&Pending) -> bool,
    ) -> Option<(TaskId, Deferred)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until && eligible(p))
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(index, _)| index)?;
        let task = self.pending.remove(index);
        self.now = self.now.max(task.due);
        Some((task.id, task.task))
    }

    /// Moves the clock forward; it never runs backwards.
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}
