//! Shared inputs for the mj benches.

use mj_core::{GameState, RoundOutcome, RoundResult, Rules};

/// Deterministic outcomes for a four-seat table, no rand dependency.
pub fn gen_outcomes(n: usize) -> Vec<RoundOutcome> {
    let mut x: u64 = 0x1234_5678_9ABC_DEF0;
    let mut next = move || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };
    (0..n)
        .map(|_| {
            let winner = (next() % 4) as usize;
            let discarder = (next() % 4) as usize;
            let fan = (next() % 14) as u8;
            let o = RoundOutcome::discard(winner, discarder, fan);
            if next() % 8 == 0 {
                o.with_penalty((winner + 1) % 4)
            } else {
                o
            }
        })
        .collect()
}

/// A game with `rounds` scored rounds.
pub fn gen_game(rounds: usize) -> GameState {
    let rules = Rules::default();
    let history: Vec<RoundResult> = gen_outcomes(rounds)
        .iter()
        .filter_map(|o| mj_core::compute_deltas(o, 4, &rules).ok())
        .map(RoundResult::new)
        .collect();
    GameState {
        history,
        ..GameState::default()
    }
}
