//! Showcase Puzzle Steps
//!
//! Deterministic step generators and view projectors behind the animated
//! puzzle demos on the showcase site.
//!
//! # Shape
//!
//! Every demo follows the same three-part pattern:
//!
//! - **Generate**: a pure function turns a fixed input into a finite, fully
//!   materialized sequence of steps. Nothing is computed during playback.
//! - **Play**: a cursor walks that sequence one step per tick. The delay
//!   before leaving a step is a pure function of the step itself
//!   ([`Demo::delay`]). Playback lives in `showcase-vis`.
//! - **Project**: a pure function of `(steps, cursor)` builds the view model
//!   the front end renders ([`Demo::project`]).
//!
//! # Demos
//!
//! | module | puzzle |
//! |---|---|
//! | [`dial`] | rotating dial, counting landings on zero |
//! | [`halves`] | split a string and compare the halves |
//! | [`pattern`] | grow the shortest repeating prefix |
//! | [`digits`] | pick the largest subsequence of digits |
//! | [`grid`] | peel accessible cells in synchronous passes |
//! | [`ranges`] | id lookups and interval merging |

use std::time::Duration;

use serde::Serialize;

mod error;
mod neighbors;

pub mod dial;
pub mod digits;
pub mod grid;
pub mod halves;
pub mod pattern;
pub mod ranges;

pub use error::{ParseError, Result};
pub use neighbors::{count_present_neighbors, in_bounds_neighbors, NEIGHBOR_OFFSETS};

/// A precomputed puzzle simulation that can be played back and rendered.
///
/// Implementors generate their steps once at construction; every method here
/// is a pure read of that sequence.
pub trait Demo {
    /// One materialized transition.
    type Step: Clone + Serialize;
    /// What the front end renders for a cursor position.
    type View: Serialize + PartialEq;

    /// Stable identifier used in routes and logs.
    fn name(&self) -> &'static str;

    /// The full step sequence.
    fn steps(&self) -> &[Self::Step];

    /// How long `step` stays on screen before the cursor moves past it.
    fn delay(&self, step: &Self::Step) -> Duration;

    /// Pause after the last step before playback starts over, if it loops.
    fn restart_delay(&self) -> Option<Duration>;

    /// Build the view for `cursor`. Cursors past the end show the last step.
    fn project(&self, cursor: usize) -> Self::View;
}

/// Clamp a cursor into `0..len`, or `None` for an empty sequence.
pub(crate) fn clamp_cursor(len: usize, cursor: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| cursor.min(last))
}
