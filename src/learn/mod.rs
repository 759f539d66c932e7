//! Self-play training: an endless loop of 1000-position epochs, each
//! played across 8 worker threads, folded into a single AdaGrad update of
//! the shared PP evaluation table and checkpointed to disk periodically.
//!
//! Invoked synchronously from the USI loop by `go mate` with the `Mate`
//! option set to `Learn` — like the source engine, this call never returns
//! on its own; it runs until the process is killed.

pub mod gradient;
pub mod worker;

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::eval;
use crate::search::control;

/// Self-play games contributing to one epoch before its gradient is folded
/// into the weight table.
const POSITIONS_PER_EPOCH: u64 = 1000;
/// Worker thread count, matching the source engine.
const THREAD_NUM: u64 = 8;
/// A checkpoint of `pp.bin` is rotated aside every this many epochs.
const SNAPSHOT_INTERVAL: u64 = 25;
/// Upper bound on how many rotated snapshot names are tried before giving
/// up on finding a free one.
const SNAPSHOT_SLOTS: u32 = 900;

/// Runs self-play training epochs forever.
pub fn run() {
    println!("info string learn");
    control::set_learning(true);

    for epoch in 0u64.. {
        gradient::GRADIENT.lock().start_epoch();
        gradient::EPOCH_POS_NUM.store(0, std::sync::atomic::Ordering::SeqCst);

        std::thread::scope(|scope| {
            for i in 0..THREAD_NUM {
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(i);
                    while gradient::EPOCH_POS_NUM.load(std::sync::atomic::Ordering::SeqCst)
                        < POSITIONS_PER_EPOCH
                    {
                        let game = worker::play_one_game(&mut rng);
                        let mut state = gradient::GRADIENT.lock();
                        gradient::accumulate_game(
                            &mut state,
                            &game.quiescence_leaves,
                            &game.scores,
                            game.k0,
                            game.k_final,
                            game.result,
                        );
                    }
                });
            }
        });

        let mut state = gradient::GRADIENT.lock();
        let (min, max) = gradient::symmetrize_and_update(&mut state);
        let pos_num = state.pos_num;
        drop(state);

        println!("info string {epoch} {pos_num} {min} {max}");

        if (epoch + 1) % SNAPSHOT_INTERVAL == 0 {
            rotate_snapshot();
        }
    }
}

/// Finds the first unused `pp_<100..999>.bin` name, renames the current
/// `pp.bin` to it, then writes the in-memory weight table to a fresh
/// `pp.bin`. Leaves an intentional off-by-one-epoch lag in the checkpoint
/// chain (the file renamed at the end of epoch `e` holds the weights as of
/// epoch `e`, not `e+1`), matching the source engine.
fn rotate_snapshot() {
    for i in 0..SNAPSHOT_SLOTS {
        let name = format!("pp_{}.bin", 100 + i);
        if Path::new(&name).exists() {
            continue;
        }
        if std::fs::rename("pp.bin", &name).is_err() {
            return;
        }
        let _ = eval::save_weights(Path::new("pp.bin"));
        return;
    }
}
