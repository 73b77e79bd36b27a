//! A score-keeping session: latest state, its store, and an optional event log.
//!
//! Each mutation computes the next `GameState`, saves it, and only then
//! adopts it. A failed save leaves the session on the previous state.

use std::path::Path;

use mj_core::{to_csv, GameState, RoundOutcome, RoundResult, Rules, StateError};
use mj_logging::{
    hash_state_bytes, NdjsonWriter, PlayerRenamedV1, RoundCommittedV1, RoundUndoneV1,
    StateLoadedV1, StateResetV1,
};
use serde::Serialize;
use thiserror::Error;

use crate::kv::{KvStore, StoreError};
use crate::persist::{encode_state, load_state_for_rules, save_state};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Scorekeeper<S: KvStore> {
    store: S,
    rules: Rules,
    state: GameState,
    load_status: Option<String>,
    log: Option<NdjsonWriter>,
    log_error: Option<String>,
}

impl<S: KvStore> Scorekeeper<S> {
    /// Rehydrate from `store`; a missing or corrupt slot starts a fresh game.
    pub fn open(store: S, rules: Rules) -> Self {
        let (state, load_status) = load_state_for_rules(&store, &rules);
        Self {
            store,
            rules,
            state,
            load_status,
            log: None,
            log_error: None,
        }
    }

    /// Attach an NDJSON event log and record the load in it.
    pub fn with_event_log(mut self, path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut w = NdjsonWriter::open_append(path)?;
        let hash = state_hash(&self.state)?;
        w.write_event(&StateLoadedV1::new(
            self.state.rounds_played(),
            self.load_status.clone(),
            hash,
        ))?;
        self.log = Some(w);
        Ok(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Why the stored state was not used at open, if it wasn't.
    pub fn load_status(&self) -> Option<&str> {
        self.load_status.as_deref()
    }

    /// Last event-log write failure. Logging never blocks a mutation.
    pub fn log_error(&self) -> Option<&str> {
        self.log_error.as_deref()
    }

    pub fn totals(&self) -> Vec<i64> {
        self.state.totals()
    }

    pub fn round_label(&self) -> String {
        self.state.round_label(&self.rules)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete(&self.rules)
    }

    pub fn export_csv(&self) -> String {
        to_csv(&self.state)
    }

    pub fn preview(&self, outcome: &RoundOutcome) -> Result<Vec<i32>, StateError> {
        self.state.preview(outcome, &self.rules)
    }

    /// Score `outcome`, record it, and persist.
    pub fn commit(&mut self, outcome: &RoundOutcome) -> Result<&GameState, SessionError> {
        let label = self.round_label();
        let deltas = self.preview(outcome)?;
        let next = self.state.commit_round(RoundResult::new(deltas.clone()))?;
        self.adopt(next)?;

        let event = state_hash(&self.state).map(|h| {
            RoundCommittedV1::new(self.state.rounds_played() - 1, label, deltas, self.totals(), h)
        });
        self.log_event(event);
        Ok(&self.state)
    }

    /// Drop the last round and persist. No-op on an empty history.
    pub fn undo(&mut self) -> Result<&GameState, StoreError> {
        let removed = self.state.history.last().map(|r| r.deltas.clone());
        let next = self.state.undo_last_round();
        self.adopt(next)?;

        let rounds_left = self.state.rounds_played();
        let event = state_hash(&self.state).map(|h| RoundUndoneV1::new(removed, rounds_left, h));
        self.log_event(event);
        Ok(&self.state)
    }

    pub fn rename(&mut self, seat: usize, name: &str) -> Result<&GameState, SessionError> {
        let next = self.state.rename_player(seat, name)?;
        self.adopt(next)?;

        let event =
            state_hash(&self.state).map(|h| PlayerRenamedV1::new(seat, name.to_string(), h));
        self.log_event(event);
        Ok(&self.state)
    }

    /// Clear the history, keeping the table, and persist.
    pub fn reset(&mut self) -> Result<&GameState, StoreError> {
        let discarded = self.state.rounds_played();
        let next = self.state.reset();
        self.adopt(next)?;

        let event = state_hash(&self.state).map(|h| StateResetV1::new(discarded, h));
        self.log_event(event);
        Ok(&self.state)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn adopt(&mut self, next: GameState) -> Result<(), StoreError> {
        save_state(&mut self.store, &next)?;
        self.state = next;
        Ok(())
    }

    fn log_event<E: Serialize>(&mut self, event: Result<E, StoreError>) {
        let Some(w) = self.log.as_mut() else {
            return;
        };
        let res = event.and_then(|e| w.write_event(&e).map_err(StoreError::from));
        if let Err(e) = res {
            self.log_error = Some(e.to_string());
        }
    }
}

fn state_hash(state: &GameState) -> Result<String, StoreError> {
    Ok(hash_state_bytes(&encode_state(state)?))
}
