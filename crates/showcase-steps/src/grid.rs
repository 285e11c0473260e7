//! Grid accessibility demo.
//!
//! Rolls (`@`) with fewer than four rolls among their 8 neighbors are
//! accessible and get removed (`x`). Removal happens in synchronous passes:
//! every decision in a pass reads the snapshot taken when the pass started,
//! and all accessible rolls are removed together once the pass ends. Passes
//! repeat until one finds nothing to remove.
//!
//! For the animation each neighbor inspection is its own step, with exactly
//! one active neighbor. Every step of a pass shares that pass's snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::neighbors::{count_present_neighbors, in_bounds_neighbors};
use crate::{clamp_cursor, Demo};

/// Time per step.
pub const STEP_DELAY: Duration = Duration::from_millis(75);

/// A roll is accessible with strictly fewer neighboring rolls than this.
pub const ACCESS_LIMIT: usize = 4;

/// Grid shown on the site.
pub const DEFAULT_INPUT: [&str; 10] = [
    "..@@.@@@@.",
    "@@@.@.@.@@",
    "@@@@@.@.@@",
    "@.@@@@..@.",
    "@@.@@@@.@@",
    ".@@@@@@@.@",
    ".@.@.@.@@@",
    "@.@@@.@@@@",
    ".@@@@@@@@.",
    "@.@.@@@.@.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// `.`
    Empty,
    /// `@`
    Roll,
    /// `x`, a roll removed in an earlier pass
    Removed,
}

impl Cell {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Cell::Empty),
            '@' => Some(Cell::Roll),
            'x' => Some(Cell::Removed),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Roll => '@',
            Cell::Removed => 'x',
        }
    }
}

/// Row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Parse rows of `.`, `@` and `x`. Blank rows are skipped.
    pub fn parse<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for line in rows {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let row = height;
            let mut row_width = 0;
            for (col, ch) in line.chars().enumerate() {
                let cell =
                    Cell::from_char(ch).ok_or(ParseError::InvalidCell { cell: ch, row, col })?;
                cells.push(cell);
                row_width += 1;
            }
            let expected = *width.get_or_insert(row_width);
            if row_width != expected {
                return Err(ParseError::RaggedGrid {
                    row,
                    width: row_width,
                    expected,
                });
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    /// Rolls adjacent to `(row, col)`.
    pub fn adjacent_rolls(&self, row: usize, col: usize) -> usize {
        count_present_neighbors(row, col, self.height, self.width, |r, c| {
            self.get(r, c) == Cell::Roll
        })
    }

    /// Whether `(row, col)` is a roll with too few neighboring rolls.
    pub fn is_accessible(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Roll && self.adjacent_rolls(row, col) < ACCESS_LIMIT
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

/// One neighbor of the inspected cell, as seen in the pass snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborCheck {
    pub row: usize,
    pub col: usize,
    pub cell: Cell,
}

/// One inspection.
#[derive(Debug, Clone, Serialize)]
pub struct GridStep {
    /// Pass number, from 0
    pub pass: usize,
    pub row: usize,
    pub col: usize,
    /// The inspected cell in the snapshot
    pub cell: Cell,
    /// All in-bounds neighbors; empty for non-roll cells
    pub neighbors: Arc<[NeighborCheck]>,
    pub adjacent_rolls: usize,
    /// Set only on the last inspection of a cell that will be removed
    pub accessible: bool,
    pub active_neighbor: Option<(usize, usize)>,
    /// Grid as of the start of this pass
    pub snapshot: Arc<Grid>,
}

#[derive(Debug, Clone)]
pub struct GridRun {
    initial: Grid,
    /// Grid after the last removal
    settled: Grid,
    steps: Vec<GridStep>,
    passes: usize,
    total_marked: usize,
    /// `(pass, row, col)` to the first step where that cell showed up accessible
    first_accessible: HashMap<(usize, usize, usize), usize>,
}

impl GridRun {
    pub fn new(grid: Grid) -> Self {
        let mut live = grid.clone();
        let mut steps = Vec::new();
        let mut pass = 0;
        let mut total_marked = 0;

        let no_neighbors: Arc<[NeighborCheck]> = Arc::from(Vec::new());

        loop {
            let snapshot = Arc::new(live.clone());
            let mut to_mark = Vec::new();

            for row in 0..snapshot.height() {
                for col in 0..snapshot.width() {
                    let cell = snapshot.get(row, col);
                    if cell != Cell::Roll {
                        steps.push(GridStep {
                            pass,
                            row,
                            col,
                            cell,
                            neighbors: Arc::clone(&no_neighbors),
                            adjacent_rolls: 0,
                            accessible: false,
                            active_neighbor: None,
                            snapshot: Arc::clone(&snapshot),
                        });
                        continue;
                    }

                    let neighbors: Arc<[NeighborCheck]> =
                        in_bounds_neighbors(row, col, snapshot.height(), snapshot.width())
                            .map(|(r, c)| NeighborCheck {
                                row: r,
                                col: c,
                                cell: snapshot.get(r, c),
                            })
                            .collect();
                    let adjacent_rolls = neighbors.iter().filter(|n| n.cell == Cell::Roll).count();
                    let accessible = adjacent_rolls < ACCESS_LIMIT;
                    if accessible {
                        to_mark.push((row, col));
                    }

                    let step = |accessible, active_neighbor| GridStep {
                        pass,
                        row,
                        col,
                        cell,
                        neighbors: Arc::clone(&neighbors),
                        adjacent_rolls,
                        accessible,
                        active_neighbor,
                        snapshot: Arc::clone(&snapshot),
                    };

                    if neighbors.is_empty() {
                        steps.push(step(accessible, None));
                    } else {
                        let last = neighbors.len() - 1;
                        for (i, n) in neighbors.iter().enumerate() {
                            steps.push(step(accessible && i == last, Some((n.row, n.col))));
                        }
                    }
                }
            }

            if to_mark.is_empty() {
                break;
            }
            for (row, col) in to_mark {
                live.set(row, col, Cell::Removed);
                total_marked += 1;
            }
            pass += 1;
        }

        let mut first_accessible = HashMap::new();
        for (idx, s) in steps.iter().enumerate() {
            if s.accessible {
                first_accessible.entry((s.pass, s.row, s.col)).or_insert(idx);
            }
        }

        Self {
            initial: grid,
            settled: live,
            steps,
            passes: pass + 1,
            total_marked,
            first_accessible,
        }
    }

    pub fn parse<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(Grid::parse(rows)?))
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn settled(&self) -> &Grid {
        &self.settled
    }

    /// Passes run, including the final one that removed nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn total_marked(&self) -> usize {
        self.total_marked
    }

    /// Cells accessible in the first pass.
    pub fn first_pass_marked(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.pass == 0 && s.accessible)
            .count()
    }
}

/// Per-cell rendering flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCellView {
    pub glyph: char,
    /// Cell under inspection
    pub current: bool,
    /// Current cell, on the step that found it accessible
    pub accessible_here: bool,
    pub neighbor: bool,
    pub neighbor_roll: bool,
    /// The one neighbor checked in this step
    pub active_neighbor: bool,
    /// Found accessible earlier in this pass, removed when the pass ends
    pub queued: bool,
}

/// What the grid demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<GridCellView>>,
    pub pass: usize,
    pub passes: usize,
    pub row: usize,
    pub col: usize,
    pub adjacent_rolls: usize,
    pub marked_so_far: usize,
    pub pass_marked_so_far: usize,
    pub total_marked: usize,
}

/// Project the grid at `cursor`. Reads only the step's snapshot.
pub fn project(run: &GridRun, cursor: usize) -> GridView {
    let Some(cursor) = clamp_cursor(run.steps.len(), cursor) else {
        return GridView {
            width: 0,
            height: 0,
            cells: Vec::new(),
            pass: 0,
            passes: run.passes,
            row: 0,
            col: 0,
            adjacent_rolls: 0,
            marked_so_far: 0,
            pass_marked_so_far: 0,
            total_marked: run.total_marked,
        };
    };
    let step = &run.steps[cursor];
    let snapshot = &step.snapshot;

    let cells = (0..snapshot.height())
        .map(|i| {
            (0..snapshot.width())
                .map(|j| {
                    let cell = snapshot.get(i, j);
                    let current = (i, j) == (step.row, step.col);
                    let neighbor = step.neighbors.iter().find(|n| (n.row, n.col) == (i, j));
                    let queued = run
                        .first_accessible
                        .get(&(step.pass, i, j))
                        .is_some_and(|&first| cursor > first);
                    GridCellView {
                        glyph: cell.glyph(),
                        current,
                        accessible_here: current && step.accessible,
                        neighbor: !current && neighbor.is_some(),
                        neighbor_roll: !current && neighbor.is_some_and(|n| n.cell == Cell::Roll),
                        active_neighbor: !current && step.active_neighbor == Some((i, j)),
                        queued: !current && queued && cell == Cell::Roll,
                    }
                })
                .collect()
        })
        .collect();

    let seen = &run.steps[..=cursor];
    let marked_so_far = seen.iter().filter(|s| s.accessible).count();
    let pass_marked_so_far = seen
        .iter()
        .filter(|s| s.accessible && s.pass == step.pass)
        .count();

    GridView {
        width: snapshot.width(),
        height: snapshot.height(),
        cells,
        pass: step.pass,
        passes: run.passes,
        row: step.row,
        col: step.col,
        adjacent_rolls: step.adjacent_rolls,
        marked_so_far,
        pass_marked_so_far,
        total_marked: run.total_marked,
    }
}

impl Demo for GridRun {
    type Step = GridStep;
    type View = GridView;

    fn name(&self) -> &'static str {
        "grid"
    }

    fn steps(&self) -> &[GridStep] {
        &self.steps
    }

    fn delay(&self, _step: &GridStep) -> Duration {
        STEP_DELAY
    }

    /// Plays once; a manual reset starts it over.
    fn restart_delay(&self) -> Option<Duration> {
        None
    }

    fn project(&self, cursor: usize) -> GridView {
        project(self, cursor)
    }
}
