//! Pattern growth demo.
//!
//! Walks a string looking for the shortest prefix that repeats across it.
//! Each step compares one character against the candidate pattern: a match
//! keeps the pattern, a mismatch grows it to cover the current character.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{clamp_cursor, Demo};

/// Default time per comparison.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(900);

/// Value shown on the site.
pub const DEFAULT_VALUE: &str = "123121";

/// Outcome of the last comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Match,
    Mismatch,
}

/// Machine state after one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternStep {
    /// Length of the candidate prefix
    pub pattern_len: usize,
    /// Next character to check
    pub index: usize,
    pub last: Option<Comparison>,
}

/// Generate the comparison sequence for `chars`.
///
/// Strings shorter than two characters have nothing to compare and yield a
/// single terminal step.
pub fn generate(chars: &[char]) -> Vec<PatternStep> {
    let mut state = PatternStep {
        pattern_len: chars.len().min(1),
        index: 1,
        last: None,
    };
    let mut steps = vec![state];
    if chars.len() <= 1 {
        return steps;
    }

    while state.index < chars.len() {
        let expected = chars[state.index % state.pattern_len];
        let actual = chars[state.index];
        state = if actual == expected {
            PatternStep {
                pattern_len: state.pattern_len,
                index: state.index + 1,
                last: Some(Comparison::Match),
            }
        } else {
            PatternStep {
                pattern_len: state.index + 1,
                index: state.index + 1,
                last: Some(Comparison::Mismatch),
            }
        };
        steps.push(state);
    }

    steps
}

#[derive(Debug, Clone)]
pub struct PatternRun {
    chars: Vec<char>,
    step_delay: Duration,
    steps: Vec<PatternStep>,
}

impl PatternRun {
    pub fn new(value: &str) -> Self {
        Self::with_step_delay(value, DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(value: &str, step_delay: Duration) -> Self {
        let chars: Vec<char> = value.chars().collect();
        let steps = generate(&chars);
        Self {
            chars,
            step_delay,
            steps,
        }
    }

    /// The repeating prefix found once every character is checked.
    pub fn final_pattern(&self) -> String {
        let len = self.steps.last().map(|s| s.pattern_len).unwrap_or(0);
        self.chars[..len].iter().collect()
    }
}

/// Colouring of one character box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharTone {
    Plain,
    Pattern,
    Match,
    Mismatch,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharCell {
    pub ch: char,
    pub tone: CharTone,
}

/// What the pattern demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternView {
    pub cells: Vec<CharCell>,
    pub pattern: String,
    /// Character under the cursor, if still inside the string
    pub current: Option<char>,
    pub pattern_len: usize,
    pub index: usize,
}

pub fn project(run: &PatternRun, cursor: usize) -> PatternView {
    let step = clamp_cursor(run.steps.len(), cursor)
        .map(|c| run.steps[c])
        .unwrap_or(PatternStep {
            pattern_len: 0,
            index: 1,
            last: None,
        });

    let cells = run
        .chars
        .iter()
        .enumerate()
        .map(|(idx, &ch)| {
            let tone = if idx == step.index {
                match step.last {
                    Some(Comparison::Match) => CharTone::Match,
                    Some(Comparison::Mismatch) => CharTone::Mismatch,
                    None => CharTone::Pending,
                }
            } else if idx < step.pattern_len {
                CharTone::Pattern
            } else {
                CharTone::Plain
            };
            CharCell { ch, tone }
        })
        .collect();

    PatternView {
        cells,
        pattern: run.chars[..step.pattern_len].iter().collect(),
        current: run.chars.get(step.index).copied(),
        pattern_len: step.pattern_len,
        index: step.index,
    }
}

impl Demo for PatternRun {
    type Step = PatternStep;
    type View = PatternView;

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    fn delay(&self, _step: &PatternStep) -> Duration {
        self.step_delay
    }

    /// The loop starts over one step period after the last comparison.
    fn restart_delay(&self) -> Option<Duration> {
        Some(self.step_delay)
    }

    fn project(&self, cursor: usize) -> PatternView {
        project(self, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn repeating_value_keeps_short_pattern() {
        let run = PatternRun::new("123123");
        assert_eq!(run.final_pattern(), "123");
        // one initial step plus one comparison per remaining character
        assert_eq!(run.steps().len(), 6);
    }

    #[test]
    fn mismatch_grows_pattern_to_index() {
        let run = PatternRun::new("123121");
        let steps = run.steps();
        assert_eq!(steps[1].last, Some(Comparison::Mismatch)); // '2' vs '1'
        assert_eq!(steps[1].pattern_len, 2);
        assert_eq!(steps[3].last, Some(Comparison::Match)); // '1' vs '1'
        assert_eq!(steps.last().unwrap().pattern_len, 6);
    }

    #[test]
    fn short_strings_are_terminal() {
        assert_eq!(PatternRun::new("").steps().len(), 1);
        assert_eq!(PatternRun::new("7").steps().len(), 1);
        assert_eq!(PatternRun::new("7").final_pattern(), "7");
        assert_eq!(PatternRun::new("").final_pattern(), "");
    }

    #[test]
    fn current_char_tone_follows_comparison() {
        let run = PatternRun::new("1212");
        let view = run.project(0);
        assert_eq!(view.cells[0].tone, CharTone::Pattern);
        assert_eq!(view.cells[1].tone, CharTone::Pending);

        // The outcome is shown on the next character to check
        let view = run.project(1);
        assert_eq!(view.index, 2);
        assert_eq!(view.pattern, "12");
        assert_eq!(view.cells[2].tone, CharTone::Mismatch);

        let view = run.project(2);
        assert_eq!(view.cells[3].tone, CharTone::Match);
        assert_eq!(view.cells[1].tone, CharTone::Pattern);

        let end = run.project(10);
        assert_eq!(end.current, None);
        assert_eq!(end.pattern, "12");
    }

    #[test]
    fn restart_waits_one_step() {
        let run = PatternRun::with_step_delay("abab", Duration::from_millis(250));
        assert_eq!(run.restart_delay(), Some(Duration::from_millis(250)));
        assert_eq!(run.delay(&run.steps()[0]), Duration::from_millis(250));
    }

    proptest! {
        #[test]
        fn pattern_len_never_decreases(value in "[0-9a-c]{0,24}") {
            let run = PatternRun::new(&value);
            for pair in run.steps().windows(2) {
                prop_assert!(pair[1].pattern_len >= pair[0].pattern_len);
                prop_assert_eq!(pair[1].index, pair[0].index + 1);
            }
        }

        #[test]
        fn projection_is_deterministic(value in "[0-9]{0,16}", cursor in 0usize..20) {
            let run = PatternRun::new(&value);
            prop_assert_eq!(run.project(cursor), run.project(cursor));
        }
    }
}
