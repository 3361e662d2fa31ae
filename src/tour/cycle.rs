//! Edge-array tour with a node -> incoming-edge reverse index.

use super::point::{Edge, Point};
use crate::error::{Error, Result};

/// A closed tour stored as directed edges.
///
/// The tour does not own its points. [`length`](Tour::length) takes the point
/// slice the edges refer to, so one point set can back several tour buffers
/// (working, scratch and best-known copies during an annealing run).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tour {
    edges: Vec<Edge>,
    /// `reverse_index[v]` = index of the edge with `end == v`.
    reverse_index: Vec<usize>,
}

impl Tour {
    /// Creates the identity cycle `0 -> 1 -> ... -> n-1 -> 0`.
    ///
    /// A single node yields one self-loop edge; zero nodes yield no edges.
    /// Both have length 0.
    pub fn identity(n: usize) -> Self {
        let edges = (0..n)
            .map(|i| Edge::new(i, if i + 1 == n { 0 } else { i + 1 }))
            .collect();
        let mut tour = Self {
            edges,
            reverse_index: Vec::with_capacity(n),
        };
        tour.build_reverse_index();
        tour
    }

    /// Builds a tour from an explicit edge list.
    ///
    /// Fails with [`Error::InvalidReference`] if an edge names a node outside
    /// `0..edges.len()`. The edge set is otherwise taken as given; use
    /// [`order`](Tour::order) to check it forms a single cycle.
    pub fn from_edges(edges: Vec<Edge>) -> Result<Self> {
        let n = edges.len();
        if let Some((i, e)) = edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.start >= n || e.end >= n)
        {
            return Err(Error::InvalidReference {
                edge: i,
                start: e.start,
                end: e.end,
                points: n,
            });
        }

        let mut tour = Self {
            edges,
            reverse_index: Vec::with_capacity(n),
        };
        tour.build_reverse_index();
        Ok(tour)
    }

    /// Recomputes the node -> edge map from the current edge array. O(n).
    ///
    /// Must be called after any mutation that is to become committed state.
    pub fn build_reverse_index(&mut self) {
        self.reverse_index.resize(self.edges.len(), 0);
        for (i, edge) in self.edges.iter().enumerate() {
            self.reverse_index[edge.end] = i;
        }
    }

    /// Sum of the Euclidean lengths of all edges.
    ///
    /// Fails with [`Error::InvalidReference`] if any edge endpoint lies
    /// outside `points`.
    pub fn length(&self, points: &[Point]) -> Result<f64> {
        self.edges
            .iter()
            .enumerate()
            .try_fold(0.0, |acc, (i, e)| match (points.get(e.start), points.get(e.end)) {
                (Some(a), Some(b)) => Ok(acc + a.distance_to(b)),
                _ => Err(Error::InvalidReference {
                    edge: i,
                    start: e.start,
                    end: e.end,
                    points: points.len(),
                }),
            })
    }

    /// The edge array.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The node -> incoming-edge map as of the last rebuild.
    pub fn reverse_index(&self) -> &[usize] {
        &self.reverse_index
    }

    /// Index of the edge ending at `node`, if `node` is in range.
    pub fn edge_ending_at(&self, node: usize) -> Option<usize> {
        self.reverse_index.get(node).copied()
    }

    /// Number of edges (equal to the number of nodes).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the visiting order starting at node 0, or `None` if the edges
    /// do not form a single Hamiltonian cycle.
    pub fn order(&self) -> Option<Vec<usize>> {
        let n = self.edges.len();
        let mut successor = vec![usize::MAX; n];
        for e in &self.edges {
            if e.start >= n || e.end >= n || successor[e.start] != usize::MAX {
                return None;
            }
            successor[e.start] = e.end;
        }

        let mut order = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        let mut node = 0;
        for _ in 0..n {
            if visited[node] {
                return None;
            }
            visited[node] = true;
            order.push(node);
            node = successor[node];
        }

        (n == 0 || node == 0).then_some(order)
    }

    /// Checks that `reverse_index[v]` names the unique edge ending at `v`
    /// for every node.
    pub fn reverse_index_is_consistent(&self) -> bool {
        self.reverse_index.len() == self.edges.len()
            && self
                .reverse_index
                .iter()
                .enumerate()
                .all(|(v, &i)| self.edges.get(i).is_some_and(|e| e.end == v))
    }

    /// Mutable edges alongside the (possibly stale) reverse index.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Edge], &[usize]) {
        (&mut self.edges, &self.reverse_index)
    }
}

impl Clone for Tour {
    fn clone(&self) -> Self {
        Self {
            edges: self.edges.clone(),
            reverse_index: self.reverse_index.clone(),
        }
    }

    /// Copies edges and reverse index into `self`, reusing its allocations
    /// and growing them only when `source` is larger.
    fn clone_from(&mut self, source: &Self) {
        self.edges.clone_from(&source.edges);
        self.reverse_index.clone_from(&source.reverse_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    fn tour_from_order(order: &[usize]) -> Tour {
        let n = order.len();
        let edges = (0..n)
            .map(|i| Edge::new(order[i], order[(i + 1) % n]))
            .collect();
        Tour::from_edges(edges).unwrap()
    }

    #[test]
    fn test_identity_edges() {
        let tour = Tour::identity(4);
        assert_eq!(
            tour.edges(),
            &[Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 0)]
        );
        assert_eq!(tour.reverse_index(), &[3, 0, 1, 2]);
        assert_eq!(tour.order(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_identity_degenerate() {
        let empty = Tour::identity(0);
        assert!(empty.is_empty());
        assert_eq!(empty.length(&[]).unwrap(), 0.0);
        assert_eq!(empty.order(), Some(vec![]));

        let single = Tour::identity(1);
        assert_eq!(single.edges(), &[Edge::new(0, 0)]);
        assert_eq!(single.length(&[Point::new(5.0, 5.0)]).unwrap(), 0.0);
        assert_eq!(single.order(), Some(vec![0]));
    }

    #[test]
    fn test_square_length() {
        let tour = Tour::identity(4);
        let length = tour.length(&square()).unwrap();
        assert!((length - 400.0).abs() < 1e-9);
        // No intervening mutation: repeated calls agree exactly.
        assert_eq!(length, tour.length(&square()).unwrap());
    }

    #[test]
    fn test_length_invalid_reference() {
        let tour = Tour::identity(4);
        let err = tour.length(&square()[..3]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference {
                edge: 2,
                start: 2,
                end: 3,
                points: 3
            }
        ));
    }

    #[test]
    fn test_from_edges_rejects_out_of_range() {
        let err = Tour::from_edges(vec![Edge::new(0, 1), Edge::new(1, 5)]).unwrap_err();
        assert!(matches!(err, Error::InvalidReference { edge: 1, end: 5, .. }));
    }

    #[test]
    fn test_order_detects_split_cycles() {
        // Two 2-cycles: 0 <-> 1 and 2 <-> 3.
        let tour = Tour::from_edges(vec![
            Edge::new(0, 1),
            Edge::new(1, 0),
            Edge::new(2, 3),
            Edge::new(3, 2),
        ])
        .unwrap();
        assert_eq!(tour.order(), None);
        assert!(tour.reverse_index_is_consistent());
    }

    #[test]
    fn test_order_detects_duplicate_start() {
        let tour = Tour::from_edges(vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(2, 0)]).unwrap();
        assert_eq!(tour.order(), None);
    }

    #[test]
    fn test_clone_from_reuses_and_grows() {
        let big = Tour::identity(10);
        let mut small = Tour::identity(3);
        small.clone_from(&big);
        assert_eq!(small, big);

        let mut target = Tour::identity(10);
        let capacity = target.edges.capacity();
        target.clone_from(&tour_from_order(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]));
        assert_eq!(target.edges.capacity(), capacity);
        assert_eq!(target.order(), Some(vec![0, 9, 8, 7, 6, 5, 4, 3, 2, 1]));
        assert!(target.reverse_index_is_consistent());
    }

    #[test]
    fn test_stale_reverse_index_is_detected() {
        // A 2-opt exchange leaves a valid cycle behind a stale index.
        let mut tour = Tour::identity(6);
        crate::sa::exchange_edges(&mut tour, 0, 3).unwrap();
        assert!(tour.order().is_some());
        assert!(!tour.reverse_index_is_consistent());

        tour.build_reverse_index();
        assert!(tour.reverse_index_is_consistent());
    }

    #[test]
    fn test_no_consistent_index_for_duplicate_ends() {
        // (1,0),(1,2),(2,3),(3,0): node 0 is entered twice, node 1 never.
        let mut tour = Tour::identity(4);
        {
            let (edges, _) = tour.parts_mut();
            edges[0].flip();
        }
        assert!(!tour.reverse_index_is_consistent());
        tour.build_reverse_index();
        assert!(!tour.reverse_index_is_consistent());
        assert_eq!(tour.order(), None);
    }

    proptest! {
        #[test]
        fn prop_permutation_tour_is_single_cycle(
            order in (1usize..40).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        ) {
            let tour = tour_from_order(&order);
            let walked = tour.order().expect("permutation tour must be a single cycle");
            prop_assert_eq!(walked.len(), order.len());
            prop_assert!(tour.reverse_index_is_consistent());
        }

        #[test]
        fn prop_length_matches_independent_sum(
            coords in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 0..30)
        ) {
            let points: Vec<Point> = coords.into_iter().map(Point::from).collect();
            let n = points.len();
            let tour = Tour::identity(n);
            let expected: f64 = (0..n)
                .map(|i| points[i].distance_to(&points[(i + 1) % n]))
                .sum();
            prop_assert!((tour.length(&points).unwrap() - expected).abs() < 1e-6);
        }
    }
}
