//! USI protocol loop: reads commands from stdin until `quit`, dispatching
//! each to the engine and writing responses directly to stdout.

pub mod command;
pub mod options;
pub mod report;

use std::io::{self, BufRead};

use command::{parse_line, GoMode, UsiCommand};

/// Runs the USI command loop to completion (`quit`, or stdin closing).
pub fn run() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };

        match parse_line(&line) {
            UsiCommand::Usi => report::print_id_and_options(),
            UsiCommand::IsReady => {
                crate::engine::isready();
                report::print_ready_ok();
            }
            UsiCommand::SetOption { name, value } => crate::options::set(&name, &value),
            UsiCommand::Position(rest) => {
                if let Err(e) = crate::engine::set_position(&rest) {
                    eprintln!("info string position error: {e}");
                }
            }
            UsiCommand::Go(GoMode::TimeControl { btime, wtime, byoyomi }) => {
                let time = if crate::engine::turn_is_black() { btime } else { wtime };
                let msec = ((time / 30 + byoyomi) / 1000 * 1000).max(1000);
                crate::engine::think(msec);
            }
            UsiCommand::Go(GoMode::Infinite) => {
                let score = crate::engine::evaluate_current();
                println!("info score cp {score} string static score");
                crate::engine::think(86_400_000);
            }
            UsiCommand::Go(GoMode::Mate) => match crate::options::mate_mode().as_str() {
                "Learn" => crate::learn::run(),
                "Average" => crate::average::run(),
                _ => report::print_checkmate_not_implemented(),
            },
            UsiCommand::Stop => crate::search::control::set_stop(),
            UsiCommand::Quit => {
                crate::search::control::set_stop();
                break;
            }
            UsiCommand::Unknown => {}
        }
    }
}
