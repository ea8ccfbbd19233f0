use anyhow::{Context, Result};
use klondike_common::board::{Board, Difficulty};
use klondike_solver::{BackgroundCheck, SolveReport, SolverConfig, Verdict, spawn_check};
use tracing_subscriber::EnvFilter;

use std::{
    io::{IsTerminal, Write, stderr},
    thread,
    time::Duration,
};

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(stderr)
        .try_init();
}

pub fn do_check(board: Board, config: SolverConfig) -> Result<SolveReport> {
    println!("{}\n", board.pretty_print());
    let check = spawn_check(board, config);
    let report = with_spinner("Checking solvability...", check)
        .context("Solvability check was cancelled")?;
    println!("Verdict: {}", format_report(&report));
    Ok(report)
}

/// Checks the deals `first_seed..first_seed + count` one after another and
/// prints a tally of the verdicts.
pub fn do_survey(
    first_seed: u64,
    count: u64,
    difficulty: Difficulty,
    config: SolverConfig,
) -> Result<()> {
    let (mut solvable, mut unsolvable, mut unknown) = (0, 0, 0);
    for offset in 0..count {
        let seed = first_seed.wrapping_add(offset);
        let check = spawn_check(Board::new_from_seed(seed, difficulty), config);
        let report = with_spinner(&format!("Checking seed {seed}..."), check)
            .with_context(|| format!("Check of seed {seed} was cancelled"))?;
        println!("Seed {seed}: {}", format_report(&report));
        match report.verdict {
            Verdict::Solvable => solvable += 1,
            Verdict::Unsolvable => unsolvable += 1,
            Verdict::Unknown => unknown += 1,
        }
    }
    println!("\nSolvable: {solvable}, Unsolvable: {unsolvable}, Unknown: {unknown}");
    Ok(())
}

fn format_report(report: &SolveReport) -> String {
    format!(
        "{} (Iterations: {}, Visited: {}, Time: {})",
        report.verdict,
        report.iterations,
        report.visited,
        format_elapsed(report.elapsed)
    )
}

/// Waits for `check`, drawing a spinner on stderr when it is a terminal.
fn with_spinner(message: &str, check: BackgroundCheck) -> Option<SolveReport> {
    if stderr().is_terminal() {
        let spinner_chars = ['|', '/', '-', '\\'];
        let mut i = 0;

        let _ = write!(stderr(), "\x1b[?25l"); // hide cursor
        while !check.is_finished() {
            let spinner_char = spinner_chars[i % spinner_chars.len()];
            // Lock per frame: the worker may be logging to stderr too.
            let mut handle = stderr().lock();
            let _ = write!(handle, "\r{spinner_char} {message}");
            let _ = handle.flush();
            drop(handle);
            thread::sleep(Duration::from_millis(100));
            i += 1;
        }
        let _ = write!(stderr(), "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
        let _ = stderr().flush();
    }
    check.wait()
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(42)), "0.042s");
        assert_eq!(format_elapsed(Duration::from_millis(89_500)), "89.500s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_report() {
        let report = SolveReport {
            verdict: Verdict::Unknown,
            iterations: 2000,
            visited: 1874,
            elapsed: Duration::from_millis(1250),
        };
        assert_eq!(
            format_report(&report),
            "UNKNOWN (Iterations: 2000, Visited: 1874, Time: 1.250s)"
        );
    }
}
