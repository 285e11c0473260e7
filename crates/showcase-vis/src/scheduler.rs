//! Timer capability used by playback.
//!
//! A [`Scheduler`] hands out a [`TimerToken`] per scheduled callback and
//! accepts cancellation by token. Fired tokens come back to the owner through
//! whatever channel the implementation uses; the owner decides whether a
//! token is still live.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Schedules one-shot timers.
pub trait Scheduler {
    /// Arrange for a new token to fire after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    /// Make sure `token` never fires. Unknown or already fired tokens are
    /// ignored.
    fn cancel(&mut self, token: TimerToken);
}

/// Virtual clock for deterministic tests.
///
/// Nothing fires on its own; call [`ManualScheduler::fire_next`] to advance
/// the clock to the earliest pending deadline.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    // Keyed by (deadline, id) so equal deadlines fire in schedule order
    pending: BTreeMap<(Duration, u64), TimerToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Fire the earliest timer due at or before `until`.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerToken> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let token = self.pending.remove(&(deadline, id))?;
        self.now = self.now.max(deadline);
        Some(token)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, token.0), token);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|_, t| *t != token);
    }
}

/// Tokio-backed scheduler: each timer is a task that sleeps, then sends its
/// token on the channel returned by [`TokioScheduler::new`].
///
/// Dropping the scheduler aborts every pending timer.
pub struct TokioScheduler {
    next_id: u64,
    fired: mpsc::UnboundedSender<TimerToken>,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerToken>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            fired,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let token = TimerToken(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owner is shutting down
            let _ = fired.send(token);
        });
        trace!("Scheduled timer {} in {:?}", token.0, delay);
        self.tasks.insert(token, handle);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
            trace!("Cancelled timer {}", token.0);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
