use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Handle to a one-shot timer registered with a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    fire_at: Duration,
}

#[derive(Debug, Default)]
struct SchedulerInner {
    /// Host-advanced clock, starts at zero.
    now: Duration,
    /// Pending timers. Kept sorted by `fire_at`, ties in insertion order.
    timers: Vec<TimerEntry>,
    next_id: u64,
}

/// Single-threaded timer queue driven by the host's frame clock.
///
/// Cloning yields another handle to the same queue. Nothing fires on its own:
/// the host calls [`advance`](Scheduler::advance) once per frame and dispatches
/// the returned ids.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot timer `delay` from now.
    /// The timer is cancelled when the returned guard is dropped.
    pub fn schedule(&self, delay: Duration) -> TimerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let fire_at = inner.now + delay;

        // Insert after every entry firing at or before `fire_at` so equal
        // deadlines keep scheduling order.
        let idx = inner.timers.partition_point(|t| t.fire_at <= fire_at);
        inner.timers.insert(idx, TimerEntry { id, fire_at });

        TimerGuard {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Move the clock forward and return every timer that came due, in firing order.
    pub fn advance(&self, dt: Duration) -> Vec<TimerId> {
        let mut inner = self.inner.borrow_mut();
        inner.now += dt;
        let now = inner.now;
        let due = inner.timers.partition_point(|t| t.fire_at <= now);
        inner.timers.drain(..due).map(|t| t.id).collect()
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        cancel_in(&self.inner, id)
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers still waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.iter().any(|t| t.id == id)
    }
}

fn cancel_in(inner: &RefCell<SchedulerInner>, id: TimerId) -> bool {
    let mut inner = inner.borrow_mut();
    match inner.timers.iter().position(|t| t.id == id) {
        Some(idx) => {
            inner.timers.remove(idx);
            true
        }
        None => false,
    }
}

/// Owning handle for a scheduled timer. Dropping it cancels the timer if it
/// has not fired yet; dropping after the scheduler is gone is a no-op.
#[derive(Debug)]
pub struct TimerGuard {
    id: TimerId,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TimerGuard {
    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.scheduler.upgrade() {
            cancel_in(&inner, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_when_due() {
        let s = Scheduler::new();
        let t = s.schedule(ms(100));
        assert!(s.advance(ms(99)).is_empty());
        assert_eq!(s.advance(ms(1)), vec![t.id()]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn fires_in_deadline_order() {
        let s = Scheduler::new();
        let late = s.schedule(ms(300));
        let early = s.schedule(ms(100));
        let tie = s.schedule(ms(100));
        let fired = s.advance(ms(1000));
        assert_eq!(fired, vec![early.id(), tie.id(), late.id()]);
    }

    #[test]
    fn fires_once() {
        let s = Scheduler::new();
        let _t = s.schedule(ms(10));
        assert_eq!(s.advance(ms(10)).len(), 1);
        assert!(s.advance(ms(10)).is_empty());
    }

    #[test]
    fn dropping_guard_cancels() {
        let s = Scheduler::new();
        let t = s.schedule(ms(50));
        let id = t.id();
        assert!(s.is_pending(id));
        drop(t);
        assert!(!s.is_pending(id));
        assert!(s.advance(ms(100)).is_empty());
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let s = Scheduler::new();
        let t = s.schedule(ms(5));
        s.advance(ms(5));
        assert!(!s.cancel(t.id()));
    }

    #[test]
    fn guard_outlives_scheduler() {
        let t = {
            let s = Scheduler::new();
            s.schedule(ms(5))
        };
        drop(t);
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let s = Scheduler::new();
        s.advance(ms(1000));
        let t = s.schedule(ms(10));
        assert!(s.advance(ms(9)).is_empty());
        assert_eq!(s.advance(ms(1)), vec![t.id()]);
        assert_eq!(s.now(), ms(1010));
    }
}
