//! Annealing execution loop.
//!
//! # Algorithm
//!
//! Three tour buffers are allocated once per run and only copied into
//! afterwards: the working tour `W` (last accepted state), the scratch tour
//! `S` (a copy of `W` that each move mutates) and the best-known tour `B`.
//!
//! At iteration `i`:
//!
//! 1. `T = config.temperature(i)`
//! 2. `L2 = propose_move(S)`
//! 3. accept if `L2 < L` or `(L2 - L) * T > u`, `u ~ U[0, 1)`; on accept
//!    commit `S` into `W`, and into `B` when `L2` beats the best length
//! 4. if the drift counter is negative, restore `B` into `W` and `S`;
//!    otherwise, if rejected, restore `W` into `S`
//! 5. decrement the drift counter and record `L` in the trace
//!
//! The acceptance test is linear in the length delta, not the Boltzmann
//! form `exp(-delta / T)`.

use rand::Rng;

use super::config::AnnealConfig;
use super::moves::propose_move;
use crate::error::Result;
use crate::tour::{Point, Tour};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The published tour: best-known if the working tour ended worse,
    /// otherwise the working tour.
    pub tour: Tour,

    /// Length of `tour`.
    pub length: f64,

    /// Length of the initial identity tour.
    pub initial_length: f64,

    /// Iterations executed (always the configured budget).
    pub iterations: usize,

    /// Accepted moves, improving or not.
    pub accepted_moves: usize,

    /// Accepted moves that shortened the working tour.
    pub improving_moves: usize,

    /// Accepted moves that lengthened the working tour.
    pub worsening_accepted: usize,

    /// Times the best-known tour was replaced.
    pub best_updates: usize,

    /// Times the search was forced back to the best-known tour.
    pub resets: usize,

    /// Working length after every iteration.
    pub trace: Vec<f64>,
}

/// Executes annealing runs.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Optimizes a tour through `points`, seeding from `config.seed`.
    pub fn run(points: &[Point], config: &AnnealConfig) -> Result<AnnealResult> {
        Self::run_with_rng(points, config, &mut config.rng())
    }

    /// Optimizes a tour through `points` drawing from the given random source.
    ///
    /// The initial tour visits the points in input order.
    pub fn run_with_rng<R: Rng>(
        points: &[Point],
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        config.validate()?;

        let mut annealer = Annealer::new(points, config)?;
        let initial_length = annealer.length;
        let half = config.max_iterations / 2;

        log::debug!(
            "annealing {} points for {} iterations (initial length {initial_length:.3})",
            points.len(),
            config.max_iterations
        );

        let mut trace = Vec::with_capacity(config.max_iterations);
        let mut accepted_moves = 0;
        let mut improving_moves = 0;
        let mut worsening_accepted = 0;
        let mut best_updates = 0;
        let mut resets = 0;

        for i in 0..config.max_iterations {
            let previous = annealer.length;
            let step = annealer.step(i, rng)?;

            if step.accepted {
                accepted_moves += 1;
                if step.improved {
                    improving_moves += 1;
                } else {
                    worsening_accepted += 1;
                    if i > half {
                        log::trace!(
                            "accepted worse tour at iteration {i}: temperature {:e}, delta {:.3}",
                            config.temperature(i),
                            step.candidate - previous
                        );
                    }
                }
            }
            if step.new_best {
                best_updates += 1;
            }
            if step.reset {
                resets += 1;
            }

            trace.push(annealer.length);
        }

        let (tour, length) = annealer.finish();

        log::info!(
            "annealed {} points: length {length:.3} (initial {initial_length:.3}), \
             {accepted_moves} accepted, {improving_moves} improving, {resets} resets",
            points.len()
        );

        Ok(AnnealResult {
            tour,
            length,
            initial_length,
            iterations: config.max_iterations,
            accepted_moves,
            improving_moves,
            worsening_accepted,
            best_updates,
            resets,
            trace,
        })
    }
}

/// What one iteration did.
#[derive(Debug, Clone, Copy)]
struct Step {
    /// Length of the proposed tour.
    candidate: f64,
    accepted: bool,
    improved: bool,
    new_best: bool,
    reset: bool,
}

/// Per-run annealing state.
struct Annealer<'a> {
    points: &'a [Point],
    config: &'a AnnealConfig,
    working: Tour,
    scratch: Tour,
    best: Tour,
    length: f64,
    best_length: f64,
    drift: isize,
    drift_bound: isize,
}

impl<'a> Annealer<'a> {
    fn new(points: &'a [Point], config: &'a AnnealConfig) -> Result<Self> {
        let working = Tour::identity(points.len());
        let length = working.length(points)?;
        let drift_bound = config.drift_bound(points.len()) as isize;

        Ok(Self {
            points,
            config,
            scratch: working.clone(),
            best: working.clone(),
            working,
            length,
            best_length: length,
            // The initial tour is committed as best before iteration 0, so it
            // gets the same budget as a best found mid-run: at most
            // `drift_bound` non-improving iterations before a reset.
            drift: drift_bound - 1,
            drift_bound,
        })
    }

    fn step<R: Rng>(&mut self, i: usize, rng: &mut R) -> Result<Step> {
        let temperature = self.config.temperature(i);
        let candidate = propose_move(&mut self.scratch, self.points, rng)?;

        let improved = candidate < self.length;
        let accepted =
            improved || (candidate - self.length) * temperature > rng.random::<f64>();

        let mut step = Step {
            candidate,
            accepted,
            improved,
            new_best: false,
            reset: false,
        };

        if accepted {
            self.scratch.build_reverse_index();
            self.working.clone_from(&self.scratch);
            self.length = candidate;

            if self.length < self.best_length {
                self.best_length = self.length;
                self.drift = self.drift_bound;
                self.best.clone_from(&self.scratch);
                step.new_best = true;
            }
        }

        if self.drift < 0 {
            self.length = self.best_length;
            self.working.clone_from(&self.best);
            self.scratch.clone_from(&self.best);
            self.drift = self.drift_bound;
            step.reset = true;
        } else if !accepted {
            self.scratch.clone_from(&self.working);
        }

        self.drift -= 1;
        Ok(step)
    }

    fn finish(self) -> (Tour, f64) {
        if self.length > self.best_length {
            (self.best, self.best_length)
        } else {
            (self.working, self.length)
        }
    }
}
