use anyhow::Result;
use taquin_common::{board::Board, direction::format_directions};
use taquin_solver::{HeuristicKind, SolveResult, Solver};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

pub fn do_solve<H>(
    solver: &Solver<H>,
    heuristic: HeuristicKind,
    board: Board,
    show_boards: bool,
) -> Result<()>
where
    H: Fn(&Board) -> u32,
{
    println!("{board}\n");
    let result = with_spinner("Solving the puzzle...", || solver.solve(board))?;
    let SolveResult {
        expanded,
        generated,
        elapsed,
        ..
    } = result;
    let elapsed_str = format_elapsed(elapsed);

    let Some(directions) = result.directions() else {
        println!(
            "✗ No solution — Heuristic: {heuristic}, Time: {elapsed_str}, Expanded: {expanded}, Generated: {generated}"
        );
        return Ok(());
    };

    println!(
        "✓ Solved in {} Moves — Heuristic: {heuristic}, Time: {elapsed_str}, Expanded: {expanded}, Generated: {generated}\n",
        directions.len()
    );
    if show_boards && let Some(path) = &result.path {
        for (step, (board, direction)) in path.iter().skip(1).zip(&directions).enumerate() {
            println!("{}. {direction}\n{board}\n", step + 1);
        }
    }
    print!("{}", format_directions(&directions));
    Ok(())
}

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Runs `f` while a spinner turns on stderr. Nothing is drawn when stderr
/// is not a terminal or when debug logs would interleave with it.
fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if !stderr().is_terminal() || log::log_enabled!(log::Level::Debug) {
        return f();
    }

    let done = AtomicBool::new(false);
    thread::scope(|scope| {
        scope.spawn(|| {
            let mut out = stderr().lock();
            let _ = write!(out, "\x1b[?25l");
            for frame in SPINNER_FRAMES.iter().cycle() {
                if done.load(Ordering::Relaxed) {
                    break;
                }
                let _ = write!(out, "\r{frame} {message}");
                let _ = out.flush();
                thread::sleep(SPINNER_TICK);
            }
            let _ = write!(out, "\r\x1b[2K\x1b[?25h");
            let _ = out.flush();
        });

        let value = f();
        done.store(true, Ordering::Relaxed);
        value
    })
}

/// Seconds with millisecond precision under a minute, whole minutes and
/// seconds beyond.
fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(60) {
        return format!("{:.3}s", elapsed.as_secs_f64());
    }
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(1234)), "1.234s");
        assert_eq!(format_elapsed(Duration::from_millis(59_500)), "59.500s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_with_spinner_returns_value() {
        assert_eq!(with_spinner("Working...", || 6 * 7), 42);
    }
}
