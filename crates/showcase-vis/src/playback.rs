//! Playback controller for a precomputed step sequence.
//!
//! The controller owns a cursor and at most one live timer. Every timer
//! firing is checked against that one token, so late or cancelled firings
//! are ignored instead of moving the cursor twice.

use crate::scheduler::{ManualScheduler, Scheduler, TimerToken};
use serde::{Deserialize, Serialize};
use showcase_steps::Demo;
use std::time::Duration;

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not started, cursor at zero
    Idle,
    /// Advancing on the timer
    Running,
    /// Cursor held, no timer
    Paused,
    /// Last step reached; a restart may be pending
    Completed,
}

/// Control actions accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Play,
    Pause,
    Reset,
}

/// What a timer firing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Moved to this cursor
    Advanced(usize),
    /// Moved onto the last step
    Completed,
    /// Restart delay elapsed, back at zero
    Restarted,
    /// Stale or unexpected token
    Ignored,
}

/// Playback controller, generic over where its timers come from.
pub struct Playback<S: Scheduler> {
    delays: Vec<Duration>,
    restart_delay: Option<Duration>,
    cursor: usize,
    state: PlaybackState,
    pending: Option<TimerToken>,
    cycles: u64,
    scheduler: S,
}

impl<S: Scheduler> Playback<S> {
    /// Create an idle controller. `delays[i]` is how long step `i` stays up.
    pub fn new(delays: Vec<Duration>, restart_delay: Option<Duration>, scheduler: S) -> Self {
        Self {
            delays,
            restart_delay,
            cursor: 0,
            state: PlaybackState::Idle,
            pending: None,
            cycles: 0,
            scheduler,
        }
    }

    /// Create an idle controller for the steps of `demo`.
    pub fn for_demo<D: Demo>(demo: &D, scheduler: S) -> Self {
        let delays = demo.steps().iter().map(|s| demo.delay(s)).collect();
        Self::new(delays, demo.restart_delay(), scheduler)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.delays.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Completed loops so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn looping(&self) -> bool {
        self.restart_delay.is_some()
    }

    /// The one live timer, if any.
    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.delays.len() {
            0 | 1 => 1.0,
            len => self.cursor as f64 / (len - 1) as f64,
        }
    }

    /// Apply a client action. Returns whether anything changed.
    pub fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Play => self.play(),
            Control::Pause => self.pause(),
            Control::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Start from idle, resume from pause, or start over once completed.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle => {
                self.start();
                true
            }
            PlaybackState::Paused => self.resume(),
            PlaybackState::Completed => {
                self.reset();
                true
            }
            PlaybackState::Running => false,
        }
    }

    /// Hold the cursor. Only a running controller can pause.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.disarm();
        self.state = PlaybackState::Paused;
        true
    }

    /// Continue from the held cursor with the delay of the current step.
    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Running;
        self.arm(self.delays[self.cursor]);
        true
    }

    /// Back to the first step and running, dropping any pending timer,
    /// including a pending restart.
    pub fn reset(&mut self) {
        self.disarm();
        self.cursor = 0;
        self.start();
    }

    /// Cancel everything and return to idle.
    pub fn stop(&mut self) {
        self.disarm();
        self.cursor = 0;
        self.state = PlaybackState::Idle;
    }

    /// Swap in a new sequence, as after an input change.
    pub fn replace_steps(&mut self, delays: Vec<Duration>, restart_delay: Option<Duration>) {
        self.stop();
        self.delays = delays;
        self.restart_delay = restart_delay;
        self.cycles = 0;
    }

    /// Handle a fired timer.
    pub fn on_timer(&mut self, token: TimerToken) -> Tick {
        if self.pending != Some(token) {
            return Tick::Ignored;
        }
        self.pending = None;

        match self.state {
            PlaybackState::Running => {
                self.cursor += 1;
                if self.cursor + 1 >= self.delays.len() {
                    self.complete();
                    Tick::Completed
                } else {
                    self.arm(self.delays[self.cursor]);
                    Tick::Advanced(self.cursor)
                }
            }
            PlaybackState::Completed => {
                self.cycles += 1;
                self.cursor = 0;
                self.start();
                Tick::Restarted
            }
            PlaybackState::Idle | PlaybackState::Paused => Tick::Ignored,
        }
    }

    fn start(&mut self) {
        if self.delays.len() <= 1 {
            // Nothing to animate and nothing to restart
            self.state = PlaybackState::Completed;
            return;
        }
        self.state = PlaybackState::Running;
        self.arm(self.delays[self.cursor]);
    }

    fn complete(&mut self) {
        self.state = PlaybackState::Completed;
        if let Some(delay) = self.restart_delay {
            self.arm(delay);
        }
    }

    fn arm(&mut self, delay: Duration) {
        self.disarm();
        self.pending = Some(self.scheduler.schedule(delay));
    }

    fn disarm(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl<S: Scheduler> Drop for Playback<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl Playback<ManualScheduler> {
    /// Let `dt` of virtual time pass, firing every timer that comes due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Tick> {
        let until = self.scheduler.now() + dt;
        let mut ticks = Vec::new();
        while let Some(token) = self.scheduler.fire_next(until) {
            ticks.push(self.on_timer(token));
        }
        self.scheduler.set_now(until);
        ticks
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub progress: f64,
    pub cycles: u64,
    pub looping: bool,
}

impl<S: Scheduler> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            cursor: playback.cursor,
            total_steps: playback.total_steps(),
            state: playback.state,
            progress: playback.progress(),
            cycles: playback.cycles,
            looping: playback.looping(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use showcase_steps::halves::HalvesRun;

    const MS: Duration = Duration::from_millis(1);

    fn playback(delays: &[u64], restart: Option<u64>) -> Playback<ManualScheduler> {
        Playback::new(
            delays.iter().copied().map(Duration::from_millis).collect(),
            restart.map(Duration::from_millis),
            ManualScheduler::new(),
        )
    }

    #[test]
    fn starts_idle_without_timer() {
        let p = playback(&[10, 20, 30], Some(100));
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.scheduler().pending(), 0);
    }

    #[test]
    fn advances_one_step_per_delay() {
        let mut p = playback(&[10, 20, 30], None);
        p.play();

        assert!(p.advance(9 * MS).is_empty());
        assert_eq!(p.cursor(), 0);

        assert_eq!(p.advance(MS), vec![Tick::Advanced(1)]);
        assert_eq!(p.advance(19 * MS), vec![]);
        assert_eq!(p.advance(MS), vec![Tick::Completed]);
        assert_eq!(p.cursor(), 2);
        assert_eq!(p.state(), PlaybackState::Completed);
    }

    #[test]
    fn completion_schedules_one_restart() {
        let mut p = playback(&[10, 20, 30], Some(100));
        p.play();
        p.advance(30 * MS);
        assert_eq!(p.state(), PlaybackState::Completed);
        assert_eq!(p.scheduler().pending(), 1);

        assert_eq!(p.advance(99 * MS), vec![]);
        assert_eq!(p.advance(MS), vec![Tick::Restarted]);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.state(), PlaybackState::Running);
        assert_eq!(p.cycles(), 1);
    }

    #[test]
    fn halves_loop_takes_show_split_and_restart() {
        let run = HalvesRun::new("1212");
        let mut p = Playback::for_demo(&run, ManualScheduler::new());
        p.play();

        let ticks = p.advance(2600 * MS);
        assert_eq!(ticks, vec![Tick::Advanced(1), Tick::Completed, Tick::Restarted]);
        assert_eq!(p.scheduler().now(), 2600 * MS);
    }

    #[test]
    fn without_restart_completion_is_final() {
        let mut p = playback(&[10, 10], None);
        p.play();
        p.advance(10 * MS);
        assert_eq!(p.state(), PlaybackState::Completed);
        assert_eq!(p.scheduler().pending(), 0);
        assert!(p.advance(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn pause_and_resume_keep_cursor() {
        let mut p = playback(&[10, 20, 30], None);
        p.play();
        p.advance(15 * MS);
        assert_eq!(p.cursor(), 1);

        assert!(p.pause());
        assert!(!p.pause());
        assert_eq!(p.scheduler().pending(), 0);
        assert!(p.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(p.cursor(), 1);

        // Resume waits the full delay of the current step
        assert!(p.resume());
        assert_eq!(p.advance(19 * MS), vec![]);
        assert_eq!(p.advance(MS), vec![Tick::Completed]);
    }

    #[test]
    fn pause_only_from_running() {
        let mut p = playback(&[10, 20], Some(50));
        assert!(!p.pause());
        p.play();
        p.advance(10 * MS);
        assert_eq!(p.state(), PlaybackState::Completed);
        assert!(!p.pause());
        assert!(!p.resume());
    }

    #[test]
    fn reset_cancels_pending_restart() {
        let mut p = playback(&[10, 20], Some(50));
        p.play();
        p.advance(10 * MS);
        let restart = p.pending().unwrap();

        p.reset();
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.state(), PlaybackState::Running);
        assert_eq!(p.scheduler().pending(), 1);
        assert_ne!(p.pending(), Some(restart));
        assert_eq!(p.on_timer(restart), Tick::Ignored);
        assert_eq!(p.cycles(), 0);
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut p = playback(&[10, 20, 30], None);
        p.play();
        let first = p.pending().unwrap();
        p.pause();
        p.resume();

        assert_eq!(p.on_timer(first), Tick::Ignored);
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn single_step_completes_immediately() {
        for delays in [&[][..], &[10][..]] {
            let mut p = playback(delays, Some(100));
            p.play();
            assert_eq!(p.state(), PlaybackState::Completed);
            assert_eq!(p.scheduler().pending(), 0);
            assert!(p.advance(Duration::from_secs(1)).is_empty());
        }
    }

    #[test]
    fn play_after_completion_starts_over() {
        let mut p = playback(&[10, 10], None);
        p.play();
        p.advance(10 * MS);
        assert!(p.play());
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.state(), PlaybackState::Running);
    }

    #[test]
    fn replace_steps_returns_to_idle() {
        let mut p = playback(&[10, 20, 30], Some(100));
        p.play();
        p.advance(10 * MS);

        p.replace_steps(vec![5 * MS; 4], None);
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.total_steps(), 4);
        assert_eq!(p.scheduler().pending(), 0);
    }

    #[test]
    fn status_conversion() {
        let mut p = playback(&[10, 10, 10], Some(5));
        p.play();
        p.advance(10 * MS);

        let status: PlaybackStatus = (&p).into();
        assert_eq!(status.cursor, 1);
        assert_eq!(status.total_steps, 3);
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.progress, 0.5);
        assert!(status.looping);
    }

    #[test]
    fn dial_played_to_completion_matches_direct_run() {
        use showcase_steps::dial::{self, DialRun};

        let run = DialRun::parse(dial::DEFAULT_INPUT).unwrap();
        let mut p = Playback::for_demo(&run, ManualScheduler::new());
        p.play();

        let mut ticks = 0;
        while p.state() == PlaybackState::Running {
            let deadline = p.scheduler().next_deadline().unwrap();
            let dt = deadline - p.scheduler().now();
            for tick in p.advance(dt) {
                assert_ne!(tick, Tick::Ignored);
                ticks += 1;
            }
        }
        assert_eq!(p.state(), PlaybackState::Completed);
        assert_eq!(ticks, run.steps().len() - 1);
        assert_eq!(p.scheduler().pending(), 1);

        let view = run.project(p.cursor());
        let direct = dial::simulate(run.instructions());
        assert!(view.done);
        assert_eq!(view.part_one, direct.part_one());
        assert_eq!(view.part_two, direct.part_two());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Control(Control),
        Advance(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Control(Control::Play)),
            Just(Op::Control(Control::Pause)),
            Just(Op::Control(Control::Reset)),
            (0u64..200).prop_map(Op::Advance),
        ]
    }

    proptest! {
        #[test]
        fn one_live_timer_and_forward_cursor(
            delays in prop::collection::vec(1u64..50, 0..8),
            restart in prop::option::of(1u64..100),
            ops in prop::collection::vec(op(), 0..40),
        ) {
            let mut p = playback(&delays, restart);
            for op in ops {
                let before = p.cursor();
                match op {
                    Op::Control(c) => {
                        // Controls never move the cursor forward
                        p.apply(c);
                        prop_assert!(p.cursor() == before || p.cursor() == 0);
                    }
                    Op::Advance(ms) => {
                        for tick in p.advance(Duration::from_millis(ms)) {
                            prop_assert_ne!(tick, Tick::Ignored);
                        }
                    }
                }
                prop_assert!(p.scheduler().pending() <= 1);
                prop_assert_eq!(p.pending().is_some(), p.scheduler().pending() == 1);
                prop_assert!(p.cursor() < delays.len().max(1));
            }
        }
    }
}
