//! Game state: seat names plus the ordered history of completed rounds.
//!
//! `GameState` is the unit of persistence. Every operation returns a new
//! value; callers keep the latest one and hand it to the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Rules;
use crate::scoring::{compute_deltas, is_zero_sum, RoundOutcome, ScoreError};
use crate::sequencer::{
    append_round, current_round_for_history, delete_last_round, is_game_complete, round_label,
    RoundPosition,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("round has {got} deltas, expected {expected}")]
    WrongLength { expected: usize, got: usize },
    #[error("round deltas sum to {0}, expected 0")]
    NotZeroSum(i64),
    #[error("round {index}: {source}")]
    BadRound {
        index: usize,
        #[source]
        source: Box<StateError>,
    },
    #[error("seat {seat} out of range for {player_count} players")]
    SeatOutOfRange { seat: usize, player_count: usize },
    #[error("a game needs at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// One completed round: a delta per seat, summing to zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundResult {
    pub deltas: Vec<i32>,
}

impl RoundResult {
    pub fn new(deltas: Vec<i32>) -> Self {
        Self { deltas }
    }

    fn check(&self, player_count: usize) -> Result<(), StateError> {
        if self.deltas.len() != player_count {
            return Err(StateError::WrongLength {
                expected: player_count,
                got: self.deltas.len(),
            });
        }
        if !is_zero_sum(&self.deltas) {
            let sum = self.deltas.iter().map(|&d| d as i64).sum();
            return Err(StateError::NotZeroSum(sum));
        }
        Ok(())
    }
}

impl From<Vec<i32>> for RoundResult {
    fn from(deltas: Vec<i32>) -> Self {
        Self { deltas }
    }
}

/// Running totals, recomputed from `history` on every call.
///
/// Accumulated in `i64`: each round fits in `i32`, a long game need not.
pub fn totals(history: &[RoundResult], player_count: usize) -> Vec<i64> {
    let mut out = vec![0i64; player_count];
    for round in history {
        for (t, &d) in out.iter_mut().zip(&round.deltas) {
            *t += d as i64;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_names: Vec<String>,
    pub history: Vec<RoundResult>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_names(crate::config::standard_rules().default_player_names.clone())
    }
}

impl GameState {
    pub fn with_names(player_names: Vec<String>) -> Self {
        Self {
            player_names,
            history: Vec::new(),
        }
    }

    /// Fresh game seated with `rules.default_player_names`.
    pub fn for_rules(rules: &Rules) -> Self {
        Self::with_names(rules.default_player_names.clone())
    }

    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    /// Check every invariant a persisted state must hold.
    pub fn validate(&self) -> Result<(), StateError> {
        let n = self.player_count();
        if n < 2 {
            return Err(StateError::TooFewPlayers(n));
        }
        for (index, round) in self.history.iter().enumerate() {
            round.check(n).map_err(|e| StateError::BadRound {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    pub fn totals(&self) -> Vec<i64> {
        totals(&self.history, self.player_count())
    }

    pub fn current_round(&self, rules: &Rules) -> RoundPosition {
        current_round_for_history(&self.history, self.player_count().max(1), rules.rotation)
    }

    pub fn round_label(&self, rules: &Rules) -> String {
        round_label(self.current_round(rules), &self.player_names, rules)
    }

    pub fn is_complete(&self, rules: &Rules) -> bool {
        is_game_complete(&self.history, self.player_count(), rules.rotation)
    }

    /// Score `outcome` for this table without recording it.
    pub fn preview(&self, outcome: &RoundOutcome, rules: &Rules) -> Result<Vec<i32>, StateError> {
        Ok(compute_deltas(outcome, self.player_count(), rules)?)
    }

    /// New state with `round` appended.
    pub fn commit_round(&self, round: RoundResult) -> Result<GameState, StateError> {
        round.check(self.player_count())?;
        Ok(GameState {
            player_names: self.player_names.clone(),
            history: append_round(&self.history, round),
        })
    }

    /// Score `outcome` and append it.
    pub fn commit_outcome(
        &self,
        outcome: &RoundOutcome,
        rules: &Rules,
    ) -> Result<GameState, StateError> {
        let deltas = self.preview(outcome, rules)?;
        self.commit_round(RoundResult::new(deltas))
    }

    /// New state without the final round; unchanged when there is none.
    pub fn undo_last_round(&self) -> GameState {
        GameState {
            player_names: self.player_names.clone(),
            history: delete_last_round(&self.history),
        }
    }

    pub fn rename_player(&self, seat: usize, name: impl Into<String>) -> Result<GameState, StateError> {
        if seat >= self.player_count() {
            return Err(StateError::SeatOutOfRange {
                seat,
                player_count: self.player_count(),
            });
        }
        let mut player_names = self.player_names.clone();
        player_names[seat] = name.into();
        Ok(GameState {
            player_names,
            history: self.history.clone(),
        })
    }

    /// New game at the same table: names kept, history cleared.
    pub fn reset(&self) -> GameState {
        GameState::with_names(self.player_names.clone())
    }
}
