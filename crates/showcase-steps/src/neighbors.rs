//! 8-Connection Neighbor Computation
//!
//! Every grid cell has up to 8 neighbors: 4 orthogonal and 4 diagonal.
//! Cells on the border simply have fewer in-bounds neighbors.
//!
//! The visiting order is fixed and starts straight up, sweeping
//! counter-clockwise: N, NW, W, SW, S, SE, E, NE.

/// All 8 neighbor offsets as `(d_row, d_col)`, in visiting order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// In-bounds neighbors of `(row, col)` on a `height` x `width` grid, in
/// visiting order.
pub fn in_bounds_neighbors(
    row: usize,
    col: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < height && c < width).then_some((r, c))
    })
}

/// Count how many in-bounds neighbors of a cell satisfy `is_present`.
pub fn count_present_neighbors<F>(
    row: usize,
    col: usize,
    height: usize,
    width: usize,
    is_present: F,
) -> usize
where
    F: Fn(usize, usize) -> bool,
{
    in_bounds_neighbors(row, col, height, width)
        .filter(|&(r, c)| is_present(r, c))
        .count()
}
