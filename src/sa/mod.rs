//! Simulated annealing over 2-opt moves.
//!
//! A single working tour is perturbed by random 2-opt edge exchanges. Moves
//! that shorten the tour are always kept; longer ones are kept while the
//! temperature is high enough. The best tour seen is snapshotted, and the
//! search is pulled back to it whenever it drifts too long without
//! improving.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Croes (1958), "A method for solving traveling salesman problems"

mod config;
mod moves;
mod runner;

pub use config::AnnealConfig;
pub use moves::{exchange_edges, propose_move};
pub use runner::{AnnealResult, AnnealRunner};
