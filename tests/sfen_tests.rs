//! SFEN round-trip and Zobrist determinism.

use shogi_engine::board::{self, Position};

#[test]
fn startpos_round_trips_every_generated_move() {
    let mut stack = vec![Position::empty(); 2];
    board::load_sfen(&mut stack, "startpos").unwrap();
    let pos = stack[0].clone();

    for mv in pos.generate_moves().iter() {
        let notation = mv.to_sfen();
        let mut replay = vec![Position::empty(); 2];
        let sfen = format!("startpos moves {notation}");
        board::load_sfen(&mut replay, &sfen).unwrap_or_else(|e| {
            panic!("move '{notation}' failed to replay via SFEN: {e}")
        });
        // The move that was generated must be the one that matched on replay.
        assert_eq!(replay[0].previous_move.to_sfen(), notation);
    }
}

#[test]
fn transposed_move_order_reaches_an_equal_zobrist_key() {
    // Four independent pawn advances, two per side on disjoint files, reach
    // an identical board/hand/turn triple regardless of which side's pair
    // is recorded first.
    let mut a = vec![Position::empty(); 5];
    board::load_sfen(&mut a, "startpos moves 7g7f 3c3d 2g2f 8c8d").unwrap();

    let mut b = vec![Position::empty(); 5];
    board::load_sfen(&mut b, "startpos moves 2g2f 8c8d 7g7f 3c3d").unwrap();

    assert!(a[4].board_equal(&b[4]));
    assert_eq!(a[4].key, b[4].key);
}

#[test]
fn unequal_positions_almost_never_collide() {
    let mut a = vec![Position::empty(); 2];
    board::load_sfen(&mut a, "startpos").unwrap();
    let mut b = vec![Position::empty(); 3];
    board::load_sfen(&mut b, "startpos moves 7g7f").unwrap();

    assert!(!a[0].board_equal(&b[1]));
    assert_ne!(a[0].key, b[1].key);
}

#[test]
fn hand_piece_added_after_capture_round_trips() {
    let mut stack = vec![Position::empty(); 6];
    board::load_sfen(
        &mut stack,
        "startpos moves 7g7f 3c3d 8h2b+ 3a2b",
    )
    .unwrap();
    let pos = &stack[4];
    assert_eq!(pos.hand[shogi_engine::types::Color::Black.index()]
        [shogi_engine::types::piece_type::BISHOP as usize], 1);
}
