//! Approximate closed tours through 2-D points by simulated annealing.
//!
//! - **Tour**: cyclic edge array with a reverse index, supporting 2-opt
//!   moves in time proportional to the reversed segment.
//! - **Simulated Annealing (SA)**: randomized 2-opt moves under a decaying
//!   temperature, with best-known tracking and a bounded-drift reset.
//! - **Worker**: background thread that coalesces point-set submissions to
//!   the latest one, optimizes it and publishes the result.
//!
//! # Example
//!
//! ```
//! use tour_anneal::sa::{AnnealConfig, AnnealRunner};
//! use tour_anneal::tour::Point;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 100.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(0.0, 100.0),
//! ];
//! let config = AnnealConfig::default().with_max_iterations(10_000).with_seed(42);
//! let result = AnnealRunner::run(&points, &config).unwrap();
//! assert!((result.length - 400.0).abs() < 1e-6);
//! ```

pub mod error;
pub mod sa;
pub mod tour;
pub mod worker;

pub use error::{Error, Result};
