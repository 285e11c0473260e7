//! Range coverage demo.
//!
//! Part one checks each id against the ranges in order until one contains
//! it. Part two sorts the ranges and merges them, counting every id covered
//! by at least one range exactly once. Frames play part one, then part two.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::{clamp_cursor, Demo};

/// Time per frame.
pub const STEP_DELAY: Duration = Duration::from_millis(140);

/// Pause after the last frame before starting over.
pub const RESTART_DELAY: Duration = Duration::from_millis(3000);

/// Ranges shown on the site.
pub const DEFAULT_RANGES: [&str; 4] = ["3-5", "10-14", "16-20", "12-18"];

/// Ids shown on the site.
pub const DEFAULT_IDS: [&str; 6] = ["1", "5", "8", "11", "17", "32"];

/// Inclusive id range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    /// Position in the input list
    pub id: usize,
    pub low: u64,
    pub high: u64,
}

impl IdRange {
    pub fn contains(&self, value: u64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Parse `low-high` ranges.
pub fn parse_ranges<S: AsRef<str>>(raw: &[S]) -> Result<Vec<IdRange>> {
    raw.iter()
        .enumerate()
        .map(|(id, token)| {
            let token = token.as_ref().trim();
            let invalid = || ParseError::InvalidRange {
                token: token.to_string(),
            };
            let (low, high) = token.split_once('-').ok_or_else(invalid)?;
            let low = low.trim().parse().map_err(|_| invalid())?;
            let high = high.trim().parse().map_err(|_| invalid())?;
            if low > high {
                return Err(invalid());
            }
            Ok(IdRange { id, low, high })
        })
        .collect()
}

/// Parse plain ids.
pub fn parse_ids<S: AsRef<str>>(raw: &[S]) -> Result<Vec<u64>> {
    raw.iter()
        .map(|token| {
            let token = token.as_ref().trim();
            token.parse().map_err(|_| ParseError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// One id-against-range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupStep {
    pub id_index: usize,
    pub id_value: u64,
    pub range_index: usize,
    pub range: IdRange,
    pub in_range: bool,
    /// Hit, or the last range for this id
    pub last_check_for_id: bool,
}

/// One merge of a sorted range into the running coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStep {
    pub sorted_index: usize,
    pub range: IdRange,
    /// Low bound after clipping against the coverage so far
    pub low_after: u64,
    pub high: u64,
    /// Range entirely inside the coverage so far
    pub skipped: bool,
    /// Ids this range adds
    pub fresh: u64,
    /// Ids covered after this merge
    pub fresh_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "part", rename_all = "snake_case")]
pub enum RangeStep {
    Lookup(LookupStep),
    Merge(MergeStep),
}

/// Part one: check ids against ranges, stopping at the first hit.
pub fn generate_lookups(ids: &[u64], ranges: &[IdRange]) -> Vec<LookupStep> {
    let mut steps = Vec::new();
    for (id_index, &id_value) in ids.iter().enumerate() {
        for (range_index, range) in ranges.iter().enumerate() {
            let in_range = range.contains(id_value);
            steps.push(LookupStep {
                id_index,
                id_value,
                range_index,
                range: *range,
                in_range,
                last_check_for_id: in_range || range_index + 1 == ranges.len(),
            });
            if in_range {
                break;
            }
        }
    }
    steps
}

/// Part two: merge ranges sorted by low bound. Reversed ranges are empty and
/// always skipped.
pub fn generate_merges(ranges: &[IdRange]) -> Vec<MergeStep> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.low);

    let mut steps = Vec::with_capacity(sorted.len());
    let mut covered_to: Option<u64> = None;
    let mut fresh_total = 0;

    for (sorted_index, range) in sorted.into_iter().enumerate() {
        let low_after = covered_to.map_or(range.low, |m| range.low.max(m));
        let skipped = range.low > range.high || covered_to.is_some_and(|m| m > range.high);

        let fresh = if skipped {
            0
        } else {
            // A range starting on the last covered id shares that endpoint
            let shared = u64::from(covered_to == Some(low_after));
            covered_to = Some(range.high);
            range.high - low_after + 1 - shared
        };
        fresh_total += fresh;

        steps.push(MergeStep {
            sorted_index,
            range,
            low_after,
            high: range.high,
            skipped,
            fresh,
            fresh_total,
        });
    }

    steps
}

#[derive(Debug, Clone)]
pub struct RangesRun {
    ranges: Vec<IdRange>,
    ids: Vec<u64>,
    id_covered: Vec<bool>,
    lookups: usize,
    steps: Vec<RangeStep>,
}

impl RangesRun {
    pub fn new(ranges: Vec<IdRange>, ids: Vec<u64>) -> Self {
        let id_covered = ids
            .iter()
            .map(|&id| ranges.iter().any(|r| r.contains(id)))
            .collect();
        let lookups = generate_lookups(&ids, &ranges);
        let merges = generate_merges(&ranges);

        let lookup_count = lookups.len();
        let steps = lookups
            .into_iter()
            .map(RangeStep::Lookup)
            .chain(merges.into_iter().map(RangeStep::Merge))
            .collect();

        Self {
            ranges,
            ids,
            id_covered,
            lookups: lookup_count,
            steps,
        }
    }

    pub fn parse<S: AsRef<str>>(ranges: &[S], ids: &[S]) -> Result<Self> {
        Ok(Self::new(parse_ranges(ranges)?, parse_ids(ids)?))
    }

    /// Ids that fall inside at least one range.
    pub fn covered_ids(&self) -> Vec<u64> {
        self.classified(true)
    }

    pub fn uncovered_ids(&self) -> Vec<u64> {
        self.classified(false)
    }

    fn classified(&self, covered: bool) -> Vec<u64> {
        self.ids
            .iter()
            .zip(&self.id_covered)
            .filter(|(_, &c)| c == covered)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Distinct ids covered by the union of all ranges.
    pub fn covered_total(&self) -> u64 {
        self.steps
            .iter()
            .rev()
            .find_map(|s| match s {
                RangeStep::Merge(m) => Some(m.fresh_total),
                RangeStep::Lookup(_) => None,
            })
            .unwrap_or(0)
    }

    /// Frames spent in part one.
    pub fn lookup_frames(&self) -> usize {
        self.lookups
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMarker {
    /// Being looked up right now
    Current,
    Pending,
    Covered,
    Uncovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    None,
    Covered,
    /// Added by the current merge
    Current,
}

/// One value on the number line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeColumn {
    pub x: u64,
    pub id: Option<IdMarker>,
    pub in_range: bool,
    pub coverage: Coverage,
}

/// What the range coverage demo renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangesView {
    pub columns: Vec<RangeColumn>,
    /// Step under the cursor
    pub step: Option<RangeStep>,
    pub fresh_total: u64,
}

pub fn project(run: &RangesRun, cursor: usize) -> RangesView {
    let cursor = clamp_cursor(run.steps.len(), cursor);
    let step = cursor.map(|c| run.steps[c]);
    let in_lookup = cursor.is_some_and(|c| c < run.lookups);

    let current_id = match step {
        Some(RangeStep::Lookup(l)) => Some(l.id_index),
        _ => None,
    };

    let merges_seen: &[RangeStep] = match cursor {
        Some(c) if !in_lookup => &run.steps[run.lookups..=c],
        _ => &[],
    };
    let mut covered = BTreeSet::new();
    let mut fresh_total = 0;
    for s in merges_seen {
        if let RangeStep::Merge(m) = s {
            fresh_total = m.fresh_total;
            if !m.skipped {
                covered.extend(m.low_after..=m.high);
            }
        }
    }
    let current_merge = match step {
        Some(RangeStep::Merge(m)) if !m.skipped => Some((m.low_after, m.high)),
        _ => None,
    };

    let bounds = run
        .ids
        .iter()
        .copied()
        .chain(run.ranges.iter().flat_map(|r| [r.low, r.high]));
    let domain = bounds
        .clone()
        .min()
        .zip(bounds.max())
        .map(|(lo, hi)| lo..=hi);

    let columns = domain
        .into_iter()
        .flatten()
        .map(|x| {
            let id = run.ids.iter().position(|&v| v == x).map(|idx| {
                if in_lookup && current_id == Some(idx) {
                    IdMarker::Current
                } else if cursor.is_some() && !in_lookup {
                    if run.id_covered[idx] {
                        IdMarker::Covered
                    } else {
                        IdMarker::Uncovered
                    }
                } else {
                    IdMarker::Pending
                }
            });
            let coverage = match current_merge {
                Some((lo, hi)) if x >= lo && x <= hi => Coverage::Current,
                _ if covered.contains(&x) => Coverage::Covered,
                _ => Coverage::None,
            };
            RangeColumn {
                x,
                id,
                in_range: run.ranges.iter().any(|r| r.contains(x)),
                coverage,
            }
        })
        .collect();

    RangesView {
        columns,
        step,
        fresh_total,
    }
}

impl Demo for RangesRun {
    type Step = RangeStep;
    type View = RangesView;

    fn name(&self) -> &'static str {
        "ranges"
    }

    fn steps(&self) -> &[RangeStep] {
        &self.steps
    }

    fn delay(&self, _step: &RangeStep) -> Duration {
        STEP_DELAY
    }

    fn restart_delay(&self) -> Option<Duration> {
        Some(RESTART_DELAY)
    }

    fn project(&self, cursor: usize) -> RangesView {
        project(self, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_run() -> RangesRun {
        RangesRun::parse(&DEFAULT_RANGES, &DEFAULT_IDS).unwrap()
    }

    fn column(view: &RangesView, x: u64) -> &RangeColumn {
        view.columns.iter().find(|c| c.x == x).unwrap()
    }

    #[test]
    fn parse_rejects_malformed_ranges() {
        assert!(matches!(
            parse_ranges(&["3-5", "7"]),
            Err(ParseError::InvalidRange { .. })
        ));
        assert!(matches!(
            parse_ranges(&["a-5"]),
            Err(ParseError::InvalidRange { .. })
        ));
        assert!(matches!(
            parse_ids(&["1", "x"]),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn classifies_default_ids() {
        let run = default_run();
        assert_eq!(run.covered_ids(), vec![5, 11, 17]);
        assert_eq!(run.uncovered_ids(), vec![1, 8, 32]);
    }

    #[test]
    fn lookups_stop_at_first_hit() {
        let run = default_run();
        // 1: 4 checks, 5: 1, 8: 4, 11: 2, 17: 3, 32: 4
        assert_eq!(run.lookup_frames(), 18);
        assert_eq!(run.steps().len(), 22);

        let lookups: Vec<_> = run
            .steps()
            .iter()
            .filter_map(|s| match s {
                RangeStep::Lookup(l) => Some(*l),
                RangeStep::Merge(_) => None,
            })
            .collect();
        let for_eleven: Vec<_> = lookups.iter().filter(|l| l.id_value == 11).collect();
        assert_eq!(for_eleven.len(), 2);
        assert!(!for_eleven[0].last_check_for_id);
        assert!(for_eleven[1].in_range && for_eleven[1].last_check_for_id);

        let for_one: Vec<_> = lookups.iter().filter(|l| l.id_value == 1).collect();
        assert!(for_one.iter().all(|l| !l.in_range));
        assert!(for_one[3].last_check_for_id);
    }

    #[test]
    fn merge_counts_each_id_once() {
        let run = default_run();
        // 3..=5 and 10..=20
        assert_eq!(run.covered_total(), 14);

        let merges = generate_merges(&parse_ranges(&DEFAULT_RANGES).unwrap());
        let lows: Vec<_> = merges.iter().map(|m| m.range.low).collect();
        assert_eq!(lows, [3, 10, 12, 16]);
        assert_eq!(merges.iter().map(|m| m.fresh).collect::<Vec<_>>(), [3, 5, 4, 2]);
        assert_eq!(merges[2].low_after, 14);
    }

    #[test]
    fn contained_range_is_skipped() {
        let merges = generate_merges(&parse_ranges(&["1-10", "2-4", "11-11"]).unwrap());
        assert!(merges[1].skipped);
        assert_eq!(merges[1].fresh, 0);
        assert_eq!(merges[2].fresh_total, 11);
    }

    #[test]
    fn reversed_range_is_rejected_or_skipped() {
        assert!(matches!(
            parse_ranges(&["3-5", "5-3"]),
            Err(ParseError::InvalidRange { token }) if token == "5-3"
        ));
        assert!(parse_ranges(&["4-4"]).is_ok());

        let ranges = vec![
            IdRange { id: 0, low: 5, high: 3 },
            IdRange { id: 1, low: 6, high: 8 },
        ];
        let merges = generate_merges(&ranges);
        assert!(merges[0].skipped);
        assert_eq!(merges[0].fresh, 0);
        assert_eq!(merges[1].fresh, 3);

        let run = RangesRun::new(ranges, vec![4]);
        assert_eq!(run.covered_total(), 3);
        assert_eq!(run.uncovered_ids(), vec![4]);
    }

    #[test]
    fn range_starting_at_zero_counts_zero() {
        let merges = generate_merges(&parse_ranges(&["0-2"]).unwrap());
        assert_eq!(merges[0].fresh, 3);
    }

    #[test]
    fn projection_walks_both_parts() {
        let run = default_run();

        let first = run.project(0);
        assert_eq!(first.columns.first().unwrap().x, 1);
        assert_eq!(first.columns.last().unwrap().x, 32);
        assert_eq!(column(&first, 1).id, Some(IdMarker::Current));
        assert_eq!(column(&first, 5).id, Some(IdMarker::Pending));
        assert_eq!(column(&first, 7).id, None);
        assert!(column(&first, 4).in_range);
        assert_eq!(column(&first, 4).coverage, Coverage::None);

        let merging = run.project(18);
        assert_eq!(column(&merging, 5).id, Some(IdMarker::Covered));
        assert_eq!(column(&merging, 8).id, Some(IdMarker::Uncovered));
        assert_eq!(column(&merging, 4).coverage, Coverage::Current);
        assert_eq!(merging.fresh_total, 3);

        let last = run.project(usize::MAX);
        assert_eq!(column(&last, 4).coverage, Coverage::Covered);
        assert_eq!(column(&last, 19).coverage, Coverage::Current);
        assert_eq!(column(&last, 7).coverage, Coverage::None);
        assert_eq!(last.fresh_total, 14);
    }

    #[test]
    fn projection_is_deterministic() {
        let run = default_run();
        for cursor in 0..run.steps().len() {
            assert_eq!(run.project(cursor), run.project(cursor));
        }
    }

    #[test]
    fn empty_inputs_have_no_frames() {
        let run = RangesRun::new(Vec::new(), Vec::new());
        assert!(run.steps().is_empty());
        let view = run.project(0);
        assert!(view.columns.is_empty());
        assert_eq!(view.step, None);
    }

    #[test]
    fn step_serialization() {
        let run = default_run();
        let json = serde_json::to_string(&run.steps()[0]).unwrap();
        assert!(json.contains("\"part\":\"lookup\""));

        let parsed: RangeStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, run.steps()[0]);
    }
}
