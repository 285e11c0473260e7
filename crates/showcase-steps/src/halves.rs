//! Split-and-compare demo.
//!
//! Shows a value, splits it in two halves, then highlights whether the
//! halves are equal. Odd lengths never match.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{clamp_cursor, Demo};

/// Time the whole value is shown before splitting.
pub const SHOW_DELAY: Duration = Duration::from_millis(800);

/// Time the split halves are shown before the verdict.
pub const SPLIT_DELAY: Duration = Duration::from_millis(800);

/// Time the verdict stays up before starting over.
pub const RESTART_DELAY: Duration = Duration::from_millis(1000);

/// Value shown on the site.
pub const DEFAULT_VALUE: &str = "123123";

/// Display phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalvesPhase {
    Show,
    Split,
    Highlight,
}

/// Colouring of one half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Matched,
    Mismatched,
}

/// A value split at `len / 2`.
#[derive(Debug, Clone)]
pub struct HalvesRun {
    value: String,
    split_at: usize,
    steps: Vec<HalvesPhase>,
}

impl HalvesRun {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let chars = value.chars().count();
        let split_at = value
            .char_indices()
            .nth(chars / 2)
            .map(|(i, _)| i)
            .unwrap_or(value.len());
        Self {
            value,
            split_at,
            steps: vec![HalvesPhase::Show, HalvesPhase::Split, HalvesPhase::Highlight],
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn left(&self) -> &str {
        &self.value[..self.split_at]
    }

    pub fn right(&self) -> &str {
        &self.value[self.split_at..]
    }

    /// Even length with identical halves.
    pub fn halves_match(&self) -> bool {
        self.value.chars().count() % 2 == 0 && self.left() == self.right()
    }
}

/// What the halves demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HalvesView {
    pub value: String,
    pub phase: HalvesPhase,
    pub left: String,
    pub right: String,
    pub left_tone: Tone,
    pub right_tone: Tone,
}

pub fn project(run: &HalvesRun, cursor: usize) -> HalvesView {
    let phase = clamp_cursor(run.steps.len(), cursor)
        .map(|c| run.steps[c])
        .unwrap_or(HalvesPhase::Show);
    let matched = run.halves_match();

    // Only the right half turns red on a mismatch.
    let (left_tone, right_tone) = match (phase, matched) {
        (HalvesPhase::Highlight, true) => (Tone::Matched, Tone::Matched),
        (HalvesPhase::Highlight, false) => (Tone::Neutral, Tone::Mismatched),
        _ => (Tone::Neutral, Tone::Neutral),
    };

    HalvesView {
        value: run.value.clone(),
        phase,
        left: run.left().to_string(),
        right: run.right().to_string(),
        left_tone,
        right_tone,
    }
}

impl Demo for HalvesRun {
    type Step = HalvesPhase;
    type View = HalvesView;

    fn name(&self) -> &'static str {
        "halves"
    }

    fn steps(&self) -> &[HalvesPhase] {
        &self.steps
    }

    fn delay(&self, step: &HalvesPhase) -> Duration {
        match step {
            HalvesPhase::Show => SHOW_DELAY,
            HalvesPhase::Split | HalvesPhase::Highlight => SPLIT_DELAY,
        }
    }

    fn restart_delay(&self) -> Option<Duration> {
        Some(RESTART_DELAY)
    }

    fn project(&self, cursor: usize) -> HalvesView {
        project(self, cursor)
    }
}
