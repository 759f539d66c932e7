//! Iterative deepening driver: the loop `engine::think` runs on its worker
//! thread, emitting USI `info` lines as each depth completes.

use std::time::Instant;

use crate::board::state::Position;
use crate::constants::{Score, SCORE_MATE, SCORE_MATE_IN_MAX_PLY};
use crate::search::{algorithms, control, random_move};
use crate::types::Move;

/// Formats a single USI `info` line for a completed depth, matching the
/// `info depth D time T nodes N nps K score (cp S|mate ±M) pv m1 m2 ...`
/// shape GUIs expect. `elapsed_ms` is clamped to at least 1 so the nps
/// computation never divides by zero.
pub fn format_info(depth: i32, elapsed_ms: u64, nodes: u64, score: Score, pv: &[Move]) -> String {
    let elapsed_ms = elapsed_ms.max(1);
    let score_field = if score.abs() >= SCORE_MATE_IN_MAX_PLY {
        if score > 0 {
            format!("mate +{}", SCORE_MATE - score)
        } else {
            format!("mate -{}", SCORE_MATE + score)
        }
    } else {
        format!("cp {score}")
    };
    let pv_field: String = pv.iter().map(|m| format!(" {}", m.to_sfen())).collect();
    format!(
        "info depth {depth} time {elapsed_ms} nodes {nodes} nps {} score {score_field} pv{pv_field}",
        nodes * 1000 / elapsed_ms
    )
}

/// Runs iterative deepening on `stack[root_idx]` (which must have
/// `ply == 0`) until mate is proven, time runs out, or the `SaveTime`
/// heuristic judges there isn't time for another depth, then prints
/// `bestmove`. Declares a `nyugyoku` win immediately if the root position
/// already qualifies, and falls back to a random legal move (or
/// resignation) if no depth completed in time.
pub fn run(stack: &mut [Position], root_idx: usize, time_start: Instant, time_end: Instant) {
    if stack[root_idx].is_win() {
        println!("info score mate + string nyugyoku win");
        println!("bestmove win");
        return;
    }

    let mut best_move = Move::NONE;

    if !crate::options::eval_is_random_no_search() {
        for depth in 1..crate::constants::MAX_PLY as i32 {
            let score = algorithms::search(
                stack,
                root_idx,
                -crate::constants::SCORE_INFINITE,
                crate::constants::SCORE_INFINITE,
                depth,
                time_end,
            );
            if control::should_stop() {
                break;
            }

            best_move = algorithms::root_best_move();
            let elapsed = Instant::now().saturating_duration_since(time_start);
            println!(
                "{}",
                format_info(
                    depth,
                    elapsed.as_millis() as u64,
                    control::nodes(),
                    score,
                    &algorithms::principal_variation(),
                )
            );
            if score.abs() >= SCORE_MATE_IN_MAX_PLY {
                break;
            }

            if crate::options::save_time_enabled() {
                let now = Instant::now();
                let used = now.saturating_duration_since(time_start);
                let remaining = time_end.saturating_duration_since(now);
                if remaining < used * 5 {
                    break;
                }
            }
        }
    }

    if best_move.is_none() {
        best_move = random_move::random_move(stack, root_idx, time_end);
    }
    if best_move.is_none() {
        println!("info score mate - string resign");
    }
    println!("bestmove {}", best_move.to_sfen());
}
