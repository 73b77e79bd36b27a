//! Dealer / prevailing-wind sequencing and history mutation.
//!
//! The history is treated as a value: append and delete-last return a new
//! vector and leave the input alone. Interior edits are not offered, since
//! the dealer of round `i` is derived from `i` and everything before it.

use serde::{Deserialize, Serialize};

use crate::config::{Rotation, Rules, NUM_WINDS};
use crate::state::RoundResult;

/// Who deals the round about to be played, and under which wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPosition {
    pub dealer: usize,
    /// Prevailing wind index (0 = East).
    pub wind: usize,
    /// Consecutive rounds this dealer has already kept the deal.
    pub repeat: usize,
}

fn position_from_passes(passes: usize, repeat: usize, player_count: usize) -> RoundPosition {
    RoundPosition {
        dealer: passes % player_count,
        wind: (passes / player_count) % NUM_WINDS,
        repeat,
    }
}

/// Position of the next round when the deal passes every round.
///
/// # Panics
/// Panics if `player_count` is 0.
pub fn current_round(history_len: usize, player_count: usize) -> RoundPosition {
    assert!(player_count > 0, "player_count must be > 0");
    position_from_passes(history_len, 0, player_count)
}

/// Did the dealer keep the deal after this round?
///
/// Ties, dealer wins and fake wins all replay the deal.
fn dealer_keeps(deltas: &[i32], dealer: usize) -> bool {
    deltas.iter().all(|&d| d == 0)
        || deltas.get(dealer).is_some_and(|&d| d > 0)
        || is_fake_win_shape(deltas)
}

/// One seat pays and every other seat gains the same amount.
///
/// A scored win has exactly one gaining seat, so with three or more seats
/// this shape only comes from a fake win.
fn is_fake_win_shape(deltas: &[i32]) -> bool {
    if deltas.len() < 3 {
        return false;
    }
    let mut gains = deltas.iter().filter(|&&d| d > 0);
    let Some(&first) = gains.next() else {
        return false;
    };
    let payers = deltas.iter().filter(|&&d| d < 0).count();
    payers == 1 && deltas.iter().all(|&d| d < 0 || d == first)
}

/// Count dealer passes (and the current dealer's repeat streak) over `history`.
pub fn dealer_passes(history: &[RoundResult], player_count: usize, rotation: Rotation) -> (usize, usize) {
    match rotation {
        Rotation::Fixed => (history.len(), 0),
        Rotation::RepeatOnDealerWinOrTie => {
            let mut passes = 0usize;
            let mut repeat = 0usize;
            for round in history {
                let dealer = passes % player_count.max(1);
                if dealer_keeps(&round.deltas, dealer) {
                    repeat += 1;
                } else {
                    passes += 1;
                    repeat = 0;
                }
            }
            (passes, repeat)
        }
    }
}

/// Position of the next round, replaying `history` under `rotation`.
///
/// With [`Rotation::Fixed`] this equals `current_round(history.len(), player_count)`.
///
/// # Panics
/// Panics if `player_count` is 0.
pub fn current_round_for_history(
    history: &[RoundResult],
    player_count: usize,
    rotation: Rotation,
) -> RoundPosition {
    assert!(player_count > 0, "player_count must be > 0");
    let (passes, repeat) = dealer_passes(history, player_count, rotation);
    position_from_passes(passes, repeat, player_count)
}

/// A full game is every seat dealing once under each of the four winds.
pub fn is_game_complete(history: &[RoundResult], player_count: usize, rotation: Rotation) -> bool {
    let (passes, _) = dealer_passes(history, player_count, rotation);
    passes >= NUM_WINDS * player_count
}

/// `"{wind} {dealer+1} ({name} deals)"`, with a repeat marker once the dealer has kept the deal.
pub fn round_label(pos: RoundPosition, player_names: &[String], rules: &Rules) -> String {
    let name = player_names
        .get(pos.dealer)
        .map(String::as_str)
        .unwrap_or("?");
    let mut label = format!("{} {} ({} deals)", rules.wind_name(pos.wind), pos.dealer + 1, name);
    if pos.repeat > 0 {
        label.push_str(&format!(" repeat {}", pos.repeat));
    }
    label
}

pub fn append_round(history: &[RoundResult], round: RoundResult) -> Vec<RoundResult> {
    let mut out = Vec::with_capacity(history.len() + 1);
    out.extend_from_slice(history);
    out.push(round);
    out
}

/// Drop the final round. An empty history stays empty.
pub fn delete_last_round(history: &[RoundResult]) -> Vec<RoundResult> {
    match history.split_last() {
        Some((_, rest)) => rest.to_vec(),
        None => Vec::new(),
    }
}
