//! Cooperative one-shot timers for the UI thread.
//!
//! Nothing here spawns threads. The app loop asks the scheduler which timers
//! are due, publishes an [`Event::Timer`](crate::event::Event::Timer) for each,
//! and the owner of the timer reacts (usually by scheduling the next one).
//! Time comes from a [`Clock`] so tests can drive the schedule with a
//! [`ManualClock`] instead of sleeping.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock frozen at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// One-shot timer queue keyed by [`TimerId`].
///
/// Ids are never reused, so a stale id held by a torn-down owner can never
/// match a newer timer.
pub struct Scheduler {
    clock: Rc<dyn Clock>,
    next_id: u64,
    pending: BTreeMap<TimerId, Instant>,
}

impl Scheduler {
    /// Create a scheduler reading time from `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Create a scheduler on the wall clock.
    pub fn system() -> Self {
        Self::new(Rc::new(SystemClock))
    }

    /// Current instant according to the scheduler's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedule a timer that fires at `due`.
    pub fn schedule_at(&mut self, due: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, due);
        id
    }

    /// Schedule a timer that fires `delay` after the clock's current instant.
    pub fn schedule_after(&mut self, delay: Duration) -> TimerId {
        let due = self.now() + delay;
        self.schedule_at(due)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// When the given timer will fire, if it is still pending.
    pub fn due_at(&self, id: TimerId) -> Option<Instant> {
        self.pending.get(&id).copied()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every timer whose deadline has passed, earliest
    /// first (ties broken by scheduling order).
    pub fn take_due(&mut self) -> Vec<TimerId> {
        let now = self.now();
        let mut due: Vec<(Instant, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(&id, &at)| (at, id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Shared handle to a [`Scheduler`] owned by the UI thread.
///
/// Cloning is cheap; every clone talks to the same timer queue. Borrows are
/// held only for the duration of a single call.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Rc<RefCell<Scheduler>>,
}

impl SchedulerHandle {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::from_scheduler(Scheduler::new(clock))
    }

    pub fn system() -> Self {
        Self::from_scheduler(Scheduler::system())
    }

    pub fn from_scheduler(scheduler: Scheduler) -> Self {
        Self {
            inner: Rc::new(RefCell::new(scheduler)),
        }
    }

    pub fn now(&self) -> Instant {
        self.inner.borrow().now()
    }

    pub fn schedule_after(&self, delay: Duration) -> TimerId {
        self.inner.borrow_mut().schedule_after(delay)
    }

    pub fn cancel(&self, id: TimerId) -> bool {
        self.inner.borrow_mut().cancel(id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().is_pending(id)
    }

    pub fn due_at(&self, id: TimerId) -> Option<Instant> {
        self.inner.borrow().due_at(id)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.inner.borrow().next_due()
    }

    pub fn take_due(&self) -> Vec<TimerId> {
        self.inner.borrow_mut().take_due()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
