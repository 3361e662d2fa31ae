//! Cyclic tour over a fixed 2-D point set.
//!
//! A [`Tour`] is stored as an array of directed [`Edge`]s plus a reverse
//! index mapping each node to the edge that ends at it. The reverse index
//! lets a 2-opt move reverse a segment by walking it edge by edge, without
//! scanning the whole edge array.
//!
//! # Invariants
//!
//! For a committed tour of `n` nodes:
//!
//! 1. every node in `0..n` is the start of exactly one edge and the end of
//!    exactly one edge;
//! 2. the edges form a single cycle of length `n`;
//! 3. `reverse_index[v]` is the index of the edge whose `end == v`.

mod cycle;
mod point;

pub use cycle::Tour;
pub use point::{Edge, Point};
