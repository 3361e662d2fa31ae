//! Randomized 2-opt move with segment-reversal repair.
//!
//! # Algorithm
//!
//! Given edges `e1 = (a -> b)` and `e2 = (c -> d)`, exchange their inner
//! endpoints so that `e1 = (a -> c)` and `e2 = (b -> d)`. On its own this
//! splits the tour in two; the path `b -> ... -> c` must be reversed to
//! rejoin it. Starting at `c`, the edge ending at the current node is found
//! through the reverse index, flipped, and the walk continues from its new
//! end until it arrives back at `b`.
//!
//! The reverse index is not updated by the walk. Callers must rebuild it (or
//! restore a committed copy) before the next move.

use rand::Rng;

use crate::error::{Error, Result};
use crate::tour::{Point, Tour};

/// Applies a random 2-opt move to `tour` and returns its new length.
///
/// Tours with at most one edge are left untouched and report length 0.
pub fn propose_move<R: Rng>(tour: &mut Tour, points: &[Point], rng: &mut R) -> Result<f64> {
    let n = tour.len();
    if n <= 1 {
        return Ok(0.0);
    }

    let i1 = rng.random_range(0..n);
    let mut i2 = rng.random_range(0..n);
    if i1 == i2 {
        i2 = (i2 + 1) % n;
    }

    exchange_edges(tour, i1, i2)?;
    tour.length(points)
}

/// Exchanges the inner endpoints of edges `i1` and `i2` and reverses the
/// segment between them. Returns the number of edges flipped.
///
/// Fails with [`Error::EdgeIndex`] if either index is outside the edge
/// array, leaving the tour untouched. Requires a valid reverse index on
/// entry; fails with [`Error::BrokenCycle`] if the walk does not close
/// within `n` steps, which only happens when that precondition is violated.
pub fn exchange_edges(tour: &mut Tour, i1: usize, i2: usize) -> Result<usize> {
    let n = tour.len();
    if let Some(index) = [i1, i2].into_iter().find(|&i| i >= n) {
        return Err(Error::EdgeIndex { index, edges: n });
    }
    let (edges, reverse_index) = tour.parts_mut();

    let anchor = edges[i1].end;
    let first = edges[i2].start;
    edges[i1].end = first;
    edges[i2].start = anchor;

    let mut flipped = 0;
    let mut node = first;
    while node != anchor {
        if flipped >= n {
            return Err(Error::BrokenCycle { node: first });
        }
        let edge = &mut edges[reverse_index[node]];
        edge.flip();
        node = edge.end;
        flipped += 1;
    }

    Ok(flipped)
}
