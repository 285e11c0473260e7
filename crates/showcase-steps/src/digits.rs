//! Digit selection demo.
//!
//! Picks `n` digits from a bank, in order, so the resulting number is as
//! large as possible. Each pick scans a sliding window for its maximum; the
//! window is sized so enough digits remain for the later picks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::{clamp_cursor, Demo};

/// Time per scanned digit.
pub const SCAN_DELAY: Duration = Duration::from_millis(150);

/// Pause when a pick is locked in.
pub const LOCK_DELAY: Duration = Duration::from_millis(950);

/// Pause after the last pick before starting over.
pub const RESTART_DELAY: Duration = Duration::from_millis(5000);

/// Bank shown on the site.
pub const DEFAULT_BANK: &str = "987654321111111";

/// Digits picked on the site.
pub const DEFAULT_PICKS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    /// Walking the window
    Scan,
    /// Window exhausted, maximum about to be taken
    Lock,
    Done,
}

/// Machine state after one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
    /// Window start, inclusive
    pub window_start: usize,
    /// Window end, exclusive
    pub window_end: usize,
    /// Digits picked so far
    pub picked: usize,
    /// Index being compared
    pub scan: usize,
    /// Leftmost maximum seen in `window_start..=scan`
    pub best: usize,
    /// Picked indices, in order
    pub chosen: Vec<usize>,
    pub phase: ScanPhase,
}

impl ScanState {
    fn done() -> Self {
        Self {
            window_start: 0,
            window_end: 0,
            picked: 0,
            scan: 0,
            best: 0,
            chosen: Vec::new(),
            phase: ScanPhase::Done,
        }
    }

    /// Starting state, or an immediately terminal one when `n` cannot be
    /// satisfied by the bank.
    pub fn initial(bank: &[u8], n: usize) -> Self {
        let len = bank.len();
        if len == 0 || n == 0 || n > len {
            return Self::done();
        }
        Self {
            window_start: 0,
            window_end: len - n + 1,
            picked: 0,
            scan: 0,
            best: 0,
            chosen: Vec::new(),
            phase: ScanPhase::Scan,
        }
    }

    /// Apply one transition. `Done` maps to itself.
    pub fn step(&self, bank: &[u8], n: usize) -> Self {
        let len = bank.len();
        if self.phase == ScanPhase::Done {
            return self.clone();
        }
        if self.window_start >= len || self.window_end <= self.window_start {
            return Self {
                phase: ScanPhase::Done,
                ..self.clone()
            };
        }

        match self.phase {
            ScanPhase::Scan => {
                // Strictly greater: ties keep the leftmost candidate
                let best = if bank[self.scan] > bank[self.best] {
                    self.scan
                } else {
                    self.best
                };
                if self.scan + 1 < self.window_end {
                    Self {
                        scan: self.scan + 1,
                        best,
                        ..self.clone()
                    }
                } else {
                    Self {
                        best,
                        phase: ScanPhase::Lock,
                        ..self.clone()
                    }
                }
            }
            ScanPhase::Lock => {
                let mut chosen = self.chosen.clone();
                chosen.push(self.best);
                let picked = self.picked + 1;
                let window_start = self.best + 1;
                let window_end = self.window_end + 1;

                if picked >= n || window_start >= len {
                    return Self {
                        window_start,
                        window_end,
                        picked,
                        chosen,
                        phase: ScanPhase::Done,
                        ..self.clone()
                    };
                }

                Self {
                    window_start,
                    window_end: window_end.min(len),
                    picked,
                    scan: window_start,
                    best: window_start,
                    chosen,
                    phase: ScanPhase::Scan,
                }
            }
            ScanPhase::Done => self.clone(),
        }
    }
}

/// Generate every state until the selection is complete.
pub fn generate(bank: &[u8], n: usize) -> Vec<ScanState> {
    let mut state = ScanState::initial(bank, n);
    let mut steps = vec![state.clone()];
    while state.phase != ScanPhase::Done {
        state = state.step(bank, n);
        steps.push(state.clone());
    }
    steps
}

#[derive(Debug, Clone)]
pub struct DigitsRun {
    bank: Vec<u8>,
    picks: usize,
    steps: Vec<ScanState>,
}

impl DigitsRun {
    /// Validate the bank and generate the selection.
    pub fn new(bank: &str, picks: usize) -> Result<Self> {
        let bank = bank
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(ParseError::InvalidDigit { ch, index })
            })
            .collect::<Result<Vec<u8>>>()?;
        let steps = generate(&bank, picks);
        Ok(Self { bank, picks, steps })
    }

    pub fn picks(&self) -> usize {
        self.picks
    }

    /// Digits selected once the run completes.
    pub fn selected(&self) -> String {
        self.steps
            .last()
            .map(|s| digits_of(&self.bank, &s.chosen))
            .unwrap_or_default()
    }
}

fn digits_of(bank: &[u8], indices: &[usize]) -> String {
    indices
        .iter()
        .filter_map(|&i| bank.get(i))
        .map(|d| char::from(b'0' + d))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitCell {
    pub digit: u8,
    pub in_window: bool,
    pub chosen: bool,
    pub scanning: bool,
    pub best: bool,
}

/// What the digit selection demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitsView {
    pub cells: Vec<DigitCell>,
    pub phase: ScanPhase,
    pub picked: usize,
    pub picks: usize,
    pub chosen_digits: String,
    /// Numeric value of the picked digits, if it fits in a `u64`
    pub chosen_value: Option<u64>,
}

pub fn project(run: &DigitsRun, cursor: usize) -> DigitsView {
    let fallback = ScanState::done();
    let state = clamp_cursor(run.steps.len(), cursor)
        .map(|c| &run.steps[c])
        .unwrap_or(&fallback);

    let active = state.phase != ScanPhase::Done;
    let cells = run
        .bank
        .iter()
        .enumerate()
        .map(|(idx, &digit)| DigitCell {
            digit,
            in_window: active && idx >= state.window_start && idx < state.window_end,
            chosen: state.chosen.contains(&idx),
            scanning: state.phase == ScanPhase::Scan && idx == state.scan,
            best: active && idx == state.best,
        })
        .collect();

    let chosen_digits = digits_of(&run.bank, &state.chosen);
    let chosen_value = if chosen_digits.is_empty() {
        Some(0)
    } else {
        chosen_digits.parse().ok()
    };

    DigitsView {
        cells,
        phase: state.phase,
        picked: state.picked,
        picks: run.picks,
        chosen_digits,
        chosen_value,
    }
}

impl Demo for DigitsRun {
    type Step = ScanState;
    type View = DigitsView;

    fn name(&self) -> &'static str {
        "digits"
    }

    fn steps(&self) -> &[ScanState] {
        &self.steps
    }

    fn delay(&self, step: &ScanState) -> Duration {
        match step.phase {
            ScanPhase::Scan => SCAN_DELAY,
            ScanPhase::Lock | ScanPhase::Done => LOCK_DELAY,
        }
    }

    fn restart_delay(&self) -> Option<Duration> {
        Some(RESTART_DELAY)
    }

    fn project(&self, cursor: usize) -> DigitsView {
        project(self, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selected(bank: &str, n: usize) -> String {
        DigitsRun::new(bank, n).unwrap().selected()
    }

    #[test]
    fn picks_largest_pair() {
        assert_eq!(selected("987654321111111", 2), "98");
        assert_eq!(selected("811111111111119", 2), "89");
        assert_eq!(selected("234234234234278", 2), "78");
        assert_eq!(selected("818181911112111", 2), "92");
    }

    #[test]
    fn picks_largest_twelve() {
        assert_eq!(selected("987654321111111", 12), "987654321111");
        assert_eq!(selected("811111111111119", 12), "811111111119");
        assert_eq!(selected("234234234234278", 12), "434234234278");
        assert_eq!(selected("818181911112111", 12), "888911112111");
    }

    #[test]
    fn ties_keep_leftmost() {
        let run = DigitsRun::new("3553", 1).unwrap();
        let last = run.steps().last().unwrap();
        assert_eq!(last.chosen, vec![1]);
    }

    #[test]
    fn impossible_window_is_immediately_terminal() {
        for (bank, n) in [("123", 4), ("123", 0), ("", 1)] {
            let run = DigitsRun::new(bank, n).unwrap();
            assert_eq!(run.steps().len(), 1, "bank {:?} n {}", bank, n);
            assert_eq!(run.steps()[0].phase, ScanPhase::Done);
            assert_eq!(run.selected(), "");
        }
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(
            DigitsRun::new("12a4", 2).unwrap_err(),
            ParseError::InvalidDigit { ch: 'a', index: 2 }
        );
    }

    #[test]
    fn each_scan_step_inspects_one_digit() {
        let run = DigitsRun::new("4213", 2).unwrap();
        let phases: Vec<_> = run.steps().iter().map(|s| s.phase).collect();
        // window [0,3): three scans then a lock; window [1,4): three scans, lock, done
        use ScanPhase::*;
        assert_eq!(phases, [Scan, Scan, Scan, Lock, Scan, Scan, Scan, Lock, Done]);
        assert_eq!(run.selected(), "43");
    }

    #[test]
    fn delays_follow_phase() {
        let run = DigitsRun::new("4213", 2).unwrap();
        assert_eq!(run.delay(&run.steps()[0]), SCAN_DELAY);
        assert_eq!(run.delay(&run.steps()[3]), LOCK_DELAY);
    }

    #[test]
    fn projection_highlights_window_and_best() {
        let run = DigitsRun::new("4213", 2).unwrap();
        let view = run.project(1);
        assert!(view.cells[0].best);
        assert!(view.cells[1].scanning);
        assert!(view.cells[2].in_window);
        assert!(!view.cells[3].in_window);

        let end = run.project(usize::MAX);
        assert_eq!(end.phase, ScanPhase::Done);
        assert_eq!(end.chosen_digits, "43");
        assert_eq!(end.chosen_value, Some(43));
        assert!(end.cells.iter().all(|c| !c.in_window && !c.best));
        assert!(end.cells[0].chosen && end.cells[3].chosen);
    }

    proptest! {
        #[test]
        fn every_pick_is_leftmost_window_maximum(
            bank in prop::collection::vec(0u8..10, 1..20),
            n in 1usize..8,
        ) {
            let steps = generate(&bank, n);
            for state in steps.iter().filter(|s| s.phase == ScanPhase::Lock) {
                let window = &bank[state.window_start..state.window_end];
                let max = *window.iter().max().unwrap();
                let leftmost = state.window_start + window.iter().position(|&d| d == max).unwrap();
                prop_assert_eq!(state.best, leftmost);
            }
            let last = steps.last().unwrap();
            if n <= bank.len() {
                prop_assert_eq!(last.chosen.len(), n);
            }
            prop_assert!(last.chosen.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let run = DigitsRun::new(DEFAULT_BANK, DEFAULT_PICKS).unwrap();
        for cursor in [0, 1, 15, run.steps().len() - 1, run.steps().len() + 5] {
            assert_eq!(run.project(cursor), run.project(cursor));
        }
    }
}
