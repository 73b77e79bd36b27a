//! Comma-separated export of a game.
//!
//! Line 1: player names. Each following line: one round's deltas, in history
//! order. Nothing else.

use crate::state::GameState;

pub fn to_csv(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str(&state.player_names.join(","));
    out.push('\n');
    for round in &state.history {
        let row: Vec<String> = round.deltas.iter().map(|d| d.to_string()).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
