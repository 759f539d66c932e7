//! `go mate` with the `Mate` option set to `Average`: collapses a fixed run
//! of 57 rotated training snapshots (`pp_100.bin` through `pp_156.bin`)
//! into a single averaged `pp.bin`, smoothing out the noise of any one
//! epoch's self-play sample.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::eval::PP_SIZE;

/// Number of snapshots folded together, matching the source engine's
/// hardcoded `pp_100.bin .. pp_156.bin` range.
const SNAPSHOT_COUNT: i64 = 57;
const SNAPSHOT_START: i64 = 100;

fn read_snapshot(path: &Path) -> io::Result<Vec<i16>> {
    let mut file = File::open(path)?;
    let mut buf = vec![0u8; PP_SIZE * 2];
    file.read_exact(&mut buf)?;
    Ok(buf
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect())
}

/// Averages `pp_100.bin..=pp_156.bin` and writes the rounded result back to
/// `pp.bin`. Any missing snapshot file is fatal, matching the source
/// engine's unchecked file open (a partial training run isn't something
/// this command tries to recover from).
pub fn run() {
    let mut accumulator = vec![0i64; PP_SIZE];

    for i in 0..SNAPSHOT_COUNT {
        let name = format!("pp_{}.bin", SNAPSHOT_START + i);
        let snapshot = read_snapshot(Path::new(&name))
            .unwrap_or_else(|e| panic!("failed to read training snapshot {name}: {e}"));
        for (acc, v) in accumulator.iter_mut().zip(snapshot.iter()) {
            *acc += *v as i64;
        }
    }

    let averaged: Vec<i16> = accumulator
        .iter()
        .map(|&sum| {
            let mean = sum as f64 / SNAPSHOT_COUNT as f64;
            mean.round() as i16
        })
        .collect();

    let mut buf = Vec::with_capacity(PP_SIZE * 2);
    for w in &averaged {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    if let Ok(mut file) = File::create("pp.bin") {
        let _ = file.write_all(&buf);
    }
}
