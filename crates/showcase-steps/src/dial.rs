//! Rotating dial demo.
//!
//! A dial with 100 positions starts at 50 and follows `L<n>`/`R<n>`
//! instructions one click at a time. Landing on 0 at the end of an
//! instruction counts towards `c1`; passing 0 mid-instruction counts towards
//! `c2`. Part one is `c1`, part two is `c1 + c2`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::{clamp_cursor, Demo};

/// Number of positions on the dial.
pub const PIN_COUNT: u32 = 100;

/// Position the dial starts on.
pub const INITIAL_INDEX: u32 = 50;

/// Degrees between two adjacent positions.
pub const STEP_ANGLE: f64 = 360.0 / PIN_COUNT as f64;

/// Pause between two instructions.
pub const LOAD_PAUSE: Duration = Duration::from_millis(1000);

/// Click duration before magnitude scaling.
pub const BASE_TICK_MS: f64 = 40.0;

/// Pause after the last instruction before starting over.
pub const RESTART_DELAY: Duration = Duration::from_millis(5000);

/// The instructions shown on the site.
pub const DEFAULT_INPUT: &str = "
L68
L30
R48
L5
R60
L55
L1
L99
R14
L82
";

/// Turning direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Counter-clockwise, towards lower numbers
    Left,
    /// Clockwise, towards higher numbers
    Right,
}

/// One parsed `<Direction><Magnitude>` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub direction: Direction,
    pub magnitude: u32,
    /// The token as written in the input
    pub raw: String,
}

impl Instruction {
    /// Parse a single trimmed token such as `L68`.
    pub fn parse(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        let direction = match chars.next() {
            Some('L') => Direction::Left,
            Some('R') => Direction::Right,
            _ => {
                return Err(ParseError::InvalidDirection {
                    token: token.to_string(),
                })
            }
        };
        let magnitude = chars
            .as_str()
            .parse()
            .map_err(|_| ParseError::InvalidNumber {
                token: token.to_string(),
            })?;

        Ok(Self {
            direction,
            magnitude,
            raw: token.to_string(),
        })
    }

    /// Click duration while this instruction runs.
    ///
    /// Short turns click slowly and long turns click fast: the base duration
    /// is scaled by `20 / magnitude`, clamped to `[0.3, 2.0]`.
    pub fn tick_delay(&self) -> Duration {
        let clicks = self.magnitude.max(1) as f64;
        let factor = (20.0 / clicks).clamp(0.3, 2.0);
        Duration::from_micros((BASE_TICK_MS * factor * 1000.0).round() as u64)
    }
}

/// Parse whitespace-separated tokens, skipping blank lines.
pub fn parse_instructions(raw: &str) -> Result<Vec<Instruction>> {
    raw.split_whitespace().map(Instruction::parse).collect()
}

/// Live machine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialState {
    /// Current dial position, `0..PIN_COUNT`
    pub index: u32,
    /// Instruction being executed (or about to be loaded)
    pub instruction: usize,
    /// Clicks left in the loaded instruction; 0 between instructions
    pub remaining: u32,
    pub c1: u32,
    pub c2: u32,
    pub done: bool,
}

impl DialState {
    /// Starting configuration for a program.
    pub fn initial(instructions: &[Instruction]) -> Self {
        Self {
            index: INITIAL_INDEX,
            instruction: 0,
            remaining: 0,
            c1: 0,
            c2: 0,
            done: instructions.is_empty(),
        }
    }

    /// Apply one transition. Terminal states map to themselves.
    pub fn tick(&self, instructions: &[Instruction]) -> (Self, DialTick) {
        if self.done {
            return (*self, DialTick::Finish);
        }
        let Some(instr) = instructions.get(self.instruction) else {
            return (
                Self {
                    done: true,
                    remaining: 0,
                    ..*self
                },
                DialTick::Finish,
            );
        };

        if self.remaining == 0 {
            if instr.magnitude == 0 {
                let next = self.instruction + 1;
                return (
                    Self {
                        instruction: next,
                        done: next >= instructions.len(),
                        ..*self
                    },
                    DialTick::Skip,
                );
            }
            return (
                Self {
                    remaining: instr.magnitude,
                    ..*self
                },
                DialTick::Load,
            );
        }

        let index = turn(self.index, instr.direction);
        let remaining = self.remaining - 1;
        let (mut c1, mut c2) = (self.c1, self.c2);
        if index == 0 {
            if remaining == 0 {
                c1 += 1;
            } else {
                c2 += 1;
            }
        }

        let mut instruction = self.instruction;
        let mut done = false;
        if remaining == 0 {
            instruction += 1;
            done = instruction >= instructions.len();
        }

        (
            Self {
                index,
                instruction,
                remaining,
                c1,
                c2,
                done,
            },
            DialTick::Turn,
        )
    }

    /// Instructions fully executed, as shown by the step counter.
    pub fn progress(&self, total: usize) -> usize {
        if self.done || self.instruction >= total {
            total
        } else if self.remaining == 0 {
            self.instruction
        } else {
            self.instruction + 1
        }
    }
}

fn turn(index: u32, direction: Direction) -> u32 {
    match direction {
        Direction::Left => (index + PIN_COUNT - 1) % PIN_COUNT,
        Direction::Right => (index + 1) % PIN_COUNT,
    }
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialTick {
    /// Initial configuration, no transition yet
    Start,
    /// Next instruction loaded, dial did not move
    Load,
    /// Zero-magnitude instruction passed over
    Skip,
    /// Dial moved one position
    Turn,
    /// Program exhausted
    Finish,
}

/// Machine state after one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialStep {
    pub tick: DialTick,
    pub state: DialState,
}

/// Final counters of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialTotals {
    pub index: u32,
    pub c1: u32,
    pub c2: u32,
}

impl DialTotals {
    pub fn part_one(&self) -> u32 {
        self.c1
    }

    pub fn part_two(&self) -> u32 {
        self.c1 + self.c2
    }
}

/// Run a program directly, without materializing steps.
pub fn simulate(instructions: &[Instruction]) -> DialTotals {
    let mut totals = DialTotals {
        index: INITIAL_INDEX,
        c1: 0,
        c2: 0,
    };
    for instr in instructions {
        for remaining in (0..instr.magnitude).rev() {
            totals.index = turn(totals.index, instr.direction);
            if totals.index == 0 {
                if remaining == 0 {
                    totals.c1 += 1;
                } else {
                    totals.c2 += 1;
                }
            }
        }
    }
    totals
}

/// Generate every machine state from the start to completion.
pub fn generate(instructions: &[Instruction]) -> Vec<DialStep> {
    let mut state = DialState::initial(instructions);
    let mut steps = vec![DialStep {
        tick: DialTick::Start,
        state,
    }];

    while !state.done {
        let (next, tick) = state.tick(instructions);
        state = next;
        steps.push(DialStep { tick, state });
    }

    steps
}

/// A generated dial program.
#[derive(Debug, Clone)]
pub struct DialRun {
    instructions: Vec<Instruction>,
    steps: Vec<DialStep>,
}

impl DialRun {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let steps = generate(&instructions);
        Self {
            instructions,
            steps,
        }
    }

    /// Parse and generate in one go.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self::new(parse_instructions(raw)?))
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Counters after the last step.
    pub fn totals(&self) -> DialTotals {
        let state = self
            .steps
            .last()
            .map(|s| s.state)
            .unwrap_or_else(|| DialState::initial(&self.instructions));
        DialTotals {
            index: state.index,
            c1: state.c1,
            c2: state.c2,
        }
    }
}

/// Row state of one instruction in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Current,
    Done,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionRow {
    pub raw: String,
    pub direction: Direction,
    pub magnitude: u32,
    pub status: RowStatus,
}

/// What the dial demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialView {
    pub index: u32,
    /// Rotation of the dial face in degrees
    pub angle: f64,
    /// Click duration in effect, used for the turn animation
    pub tick_ms: u64,
    pub step: usize,
    pub total: usize,
    pub rows: Vec<InstructionRow>,
    pub part_one: u32,
    pub part_two: u32,
    pub done: bool,
}

/// Project the dial at `cursor`.
pub fn project(run: &DialRun, cursor: usize) -> DialView {
    let state = clamp_cursor(run.steps.len(), cursor)
        .map(|c| run.steps[c].state)
        .unwrap_or_else(|| DialState::initial(&run.instructions));
    let total = run.instructions.len();

    let rows = run
        .instructions
        .iter()
        .enumerate()
        .map(|(idx, instr)| {
            let status = if !state.done && idx == state.instruction && state.remaining > 0 {
                RowStatus::Current
            } else if state.done || idx < state.instruction {
                RowStatus::Done
            } else {
                RowStatus::Pending
            };
            InstructionRow {
                raw: instr.raw.clone(),
                direction: instr.direction,
                magnitude: instr.magnitude,
                status,
            }
        })
        .collect();

    let tick_ms = current_instruction(run, &state)
        .map(Instruction::tick_delay)
        .unwrap_or(Duration::from_millis(BASE_TICK_MS as u64))
        .as_millis() as u64;

    DialView {
        index: state.index,
        angle: -(state.index as f64) * STEP_ANGLE,
        tick_ms,
        step: state.progress(total),
        total,
        rows,
        part_one: state.c1,
        part_two: state.c1 + state.c2,
        done: state.done,
    }
}

fn current_instruction<'a>(run: &'a DialRun, state: &DialState) -> Option<&'a Instruction> {
    if state.done {
        None
    } else {
        run.instructions.get(state.instruction)
    }
}

impl Demo for DialRun {
    type Step = DialStep;
    type View = DialView;

    fn name(&self) -> &'static str {
        "dial"
    }

    fn steps(&self) -> &[DialStep] {
        &self.steps
    }

    fn delay(&self, step: &DialStep) -> Duration {
        if step.state.remaining == 0 {
            return LOAD_PAUSE;
        }
        current_instruction(self, &step.state)
            .map(Instruction::tick_delay)
            .unwrap_or(LOAD_PAUSE)
    }

    fn restart_delay(&self) -> Option<Duration> {
        Some(RESTART_DELAY)
    }

    fn project(&self, cursor: usize) -> DialView {
        project(self, cursor)
    }
}
