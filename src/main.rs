//! Entry point: runs the USI command loop over stdin/stdout.

fn main() {
    shogi_engine::usi::run();
}
