use crate::fingerprint::{Fingerprint, StockKeying};
use crate::movegen::generate_moves;

use klondike_common::board::Board;
use klondike_common::engine::apply_action;

use ahash::AHashSet;
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};
use tracing::debug;

pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// A won position was reached.
    Solvable,
    /// Every reachable position was explored without a win.
    Unsolvable,
    /// The budget ran out first.
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Solvable => "SOLVABLE",
            Verdict::Unsolvable => "UNSOLVABLE",
            Verdict::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub max_iterations: usize,
    pub stock_keying: StockKeying,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stock_keying: StockKeying::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub verdict: Verdict,
    /// Positions popped off the search stack, capped at the budget.
    pub iterations: usize,
    /// Distinct positions expanded.
    pub visited: usize,
    pub elapsed: Duration,
}

/// Answers whether `board` can still be won within `max_iterations` search
/// steps.
pub fn check_solvability(board: &Board, max_iterations: usize) -> Verdict {
    let config = SolverConfig {
        max_iterations,
        ..Default::default()
    };
    Solver::new(config).solve(board).verdict
}

/// Bounded depth-first search over the positions reachable from a board.
///
/// The input is never modified; every explored position is a private clone.
/// A `Solvable` verdict is a proof. `Unsolvable` is exact only as far as the
/// [`Fingerprint`] tells positions apart, which under [`StockKeying::Length`]
/// ignores stock order.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve(&self, board: &Board) -> SolveReport {
        let cancel = AtomicBool::new(false);
        self.solve_cancelable(board, &cancel).unwrap_or(SolveReport {
            verdict: Verdict::Unknown,
            iterations: 0,
            visited: 0,
            elapsed: Duration::ZERO,
        })
    }

    /// Same as [`Solver::solve`], but gives up with `None` as soon as `cancel`
    /// is raised. The flag is polled once per iteration.
    pub fn solve_cancelable(&self, board: &Board, cancel: &AtomicBool) -> Option<SolveReport> {
        let max_iterations = self.config.max_iterations;
        let keying = self.config.stock_keying;
        let timer = Instant::now();

        let mut stack = vec![board.clone()];
        let mut visited = AHashSet::new();
        let mut iterations = 0;

        let verdict = 'search: loop {
            if cancel.load(Ordering::Relaxed) {
                debug!(iterations, "search cancelled");
                return None;
            }
            let Some(state) = stack.pop() else {
                break Verdict::Unsolvable;
            };
            iterations += 1;
            if iterations > max_iterations {
                iterations = max_iterations;
                break Verdict::Unknown;
            }
            if state.is_won() {
                break Verdict::Solvable;
            }
            if !visited.insert(Fingerprint::of(&state, keying)) {
                continue;
            }

            // Lowest priority goes on the stack first, so the best move is
            // popped next; among equals the last generated wins.
            let mut moves = generate_moves(&state);
            moves.sort_by_key(|candidate| candidate.priority);
            for candidate in &moves {
                let Some(next) = apply_action(&state, &candidate.action) else {
                    continue;
                };
                if next.is_won() {
                    break 'search Verdict::Solvable;
                }
                stack.push(next);
            }
        };

        let report = SolveReport {
            verdict,
            iterations,
            visited: visited.len(),
            elapsed: timer.elapsed(),
        };
        debug!(
            verdict = %report.verdict,
            iterations = report.iterations,
            visited = report.visited,
            elapsed = ?report.elapsed,
            "search finished"
        );
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_common::board::Difficulty;

    use pretty_assertions::assert_eq;

    const NEARLY_WON: &str = r#"Foundation1: K♥
Foundation2: K♦
Foundation3: Q♣
Foundation4: Q♠
Tableau1: |K♠
Tableau2: |K♣
DrawCount: 1"#;

    #[test]
    fn test_two_moves_from_win() {
        let board = Board::parse(NEARLY_WON).unwrap();
        board.validate().unwrap();
        let report = Solver::default().solve(&board);
        assert_eq!(report.verdict, Verdict::Solvable);
        assert_eq!(report.iterations, 2);
        assert_eq!(report.visited, 2);
    }

    #[test]
    fn test_already_won() {
        let board = Board::parse(
            r#"Foundation1: K♥
Foundation2: K♦
Foundation3: K♣
Foundation4: K♠
DrawCount: 1"#,
        )
        .unwrap();
        assert!(board.won);
        let report = Solver::default().solve(&board);
        assert_eq!(report.verdict, Verdict::Solvable);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.visited, 0);
    }

    #[test]
    fn test_empty_board_is_unsolvable() {
        let board = Board::new(Difficulty::Easy);
        let report = Solver::default().solve(&board);
        assert_eq!(report.verdict, Verdict::Unsolvable);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.visited, 1);
    }

    #[test]
    fn test_budget_is_reported() {
        let board = Board::new_from_seed(5, Difficulty::Hard);
        let config = SolverConfig {
            max_iterations: 3,
            ..Default::default()
        };
        let report = Solver::new(config).solve(&board);
        assert_eq!(report.verdict, Verdict::Unknown);
        assert_eq!(report.iterations, 3);
        assert!(report.visited <= 3);
    }

    #[test]
    fn test_zero_budget() {
        let board = Board::parse(
            r#"Foundation1: K♥
Foundation2: K♦
Foundation3: K♣
Foundation4: K♠
DrawCount: 1"#,
        )
        .unwrap();
        let config = SolverConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let report = Solver::new(config).solve(&board);
        assert_eq!(report.verdict, Verdict::Unknown);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.visited, 0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let board = Board::new_from_seed(7, Difficulty::Easy);
        let cancel = AtomicBool::new(true);
        assert_eq!(Solver::default().solve_cancelable(&board, &cancel), None);
    }

    #[test]
    fn test_input_untouched() {
        let board = Board::new_from_seed(9, Difficulty::Easy);
        let before = board.clone();
        check_solvability(&board, 500);
        assert_eq!(board, before);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Solvable.to_string(), "SOLVABLE");
        assert_eq!(Verdict::Unsolvable.to_string(), "UNSOLVABLE");
        assert_eq!(Verdict::Unknown.to_string(), "UNKNOWN");
    }
}
