//! A bounded solvability oracle for Klondike positions.
//!
//! The search is a depth-first walk over [`klondike_common::engine`]
//! transitions, ordered by move priority and pruned by position
//! [`Fingerprint`]s. It answers [`Verdict::Solvable`], [`Verdict::Unsolvable`]
//! or, when the iteration budget runs out, [`Verdict::Unknown`].
mod background;
mod fingerprint;
mod movegen;
mod solver;

pub use crate::background::{BackgroundCheck, spawn_check};
pub use crate::fingerprint::{Fingerprint, StockKeying};
pub use crate::movegen::{
    Candidate, Candidates, PRIORITY_DRAW, PRIORITY_KING_TO_EMPTY, PRIORITY_REVEAL,
    PRIORITY_TABLEAU_SHIFT, PRIORITY_TABLEAU_TO_FOUNDATION, PRIORITY_WASTE_TO_FOUNDATION,
    PRIORITY_WASTE_TO_TABLEAU, generate_moves,
};
pub use crate::solver::{
    DEFAULT_MAX_ITERATIONS, SolveReport, Solver, SolverConfig, Verdict, check_solvability,
};
