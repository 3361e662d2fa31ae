//! Points and the directed edges that connect them.

/// Immutable 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Directed connection between two nodes, referenced by index.
///
/// An edge does not own its endpoints; `start` and `end` index into the
/// point slice the tour is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Swaps the direction of the edge in place.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_from_tuple() {
        assert_eq!(Point::from((1.5, -2.0)), Point::new(1.5, -2.0));
    }

    #[test]
    fn test_edge_flip() {
        let mut e = Edge::new(3, 8);
        e.flip();
        assert_eq!(e, Edge::new(8, 3));
    }
}
