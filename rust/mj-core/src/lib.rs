//! mj-core: round scoring, dealer sequencing, game state and rules.

pub mod config;
pub mod export;
pub mod scoring;
pub mod sequencer;
pub mod state;

pub use config::{
    standard_rules, ConfigError, FanOverflow, Rotation, Rules, TiePolicy, NUM_WINDS,
    STANDARD_SCORE_TABLE,
};
pub use export::to_csv;
pub use scoring::{base_value, compute_deltas, is_zero_sum, RoundOutcome, ScoreError};
pub use sequencer::{
    append_round, current_round, current_round_for_history, dealer_passes, delete_last_round,
    is_game_complete, round_label, RoundPosition,
};
pub use state::{totals, GameState, RoundResult, StateError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod sequencer_tests;
#[cfg(test)]
mod state_tests;
