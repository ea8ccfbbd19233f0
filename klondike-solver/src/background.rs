use crate::solver::{SolveReport, Solver, SolverConfig};

use klondike_common::board::Board;

use std::{
    panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

/// A solvability check running on its own thread.
///
/// Dropping the handle detaches the worker; call [`BackgroundCheck::cancel`]
/// first if the result is no longer wanted.
#[derive(Debug)]
pub struct BackgroundCheck {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Option<SolveReport>>,
}

/// Starts checking `board` on a worker thread and returns at once. The worker
/// owns its snapshot, so the caller is free to keep playing.
pub fn spawn_check(board: Board, config: SolverConfig) -> BackgroundCheck {
    let cancel = Arc::new(AtomicBool::new(false));
    let handle = {
        let cancel = Arc::clone(&cancel);
        thread::spawn(move || Solver::new(config).solve_cancelable(&board, &cancel))
    };
    BackgroundCheck { cancel, handle }
}

impl BackgroundCheck {
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the worker is done. `None` means the check was cancelled.
    pub fn wait(self) -> Option<SolveReport> {
        match self.handle.join() {
            Ok(report) => report,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::StockKeying;
    use crate::solver::check_solvability;
    use klondike_common::board::Difficulty;

    use std::time::Duration;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_matches_sync_check() {
        for seed in [1, 2, 3] {
            let board = Board::new_from_seed(seed, Difficulty::Easy);
            let config = SolverConfig {
                max_iterations: 300,
                ..Default::default()
            };
            let report = spawn_check(board.clone(), config).wait().unwrap();
            assert_eq!(report.verdict, check_solvability(&board, 300));
        }
    }

    #[test]
    fn test_cancel_running_search() {
        // Without its bottom stock card the deal can never be won, so the
        // search only stops when told to.
        let mut board = Board::new_from_seed(5, Difficulty::Hard);
        board.stock.remove(0);
        let config = SolverConfig {
            max_iterations: usize::MAX,
            stock_keying: StockKeying::Contents,
        };

        let check = spawn_check(board, config);
        thread::sleep(Duration::from_millis(200));
        assert!(!check.is_finished());
        check.cancel();
        assert_eq!(check.wait(), None);
    }
}
