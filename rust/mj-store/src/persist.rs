//! Load-at-start / save-on-mutation contract for the game state.

use mj_core::{GameState, Rules};

use crate::kv::{KvStore, StoreError};

/// The single slot the game state lives in.
pub const STATE_KEY: &str = "mahjong-state";

pub fn encode_state(state: &GameState) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(state)?)
}

/// Parse and validate a stored state.
pub fn decode_state(bytes: &[u8]) -> Result<GameState, String> {
    let state: GameState = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    state.validate().map_err(|e| e.to_string())?;
    Ok(state)
}

/// Load the saved state, falling back to the standard default.
///
/// Never fails: a missing, unreadable or corrupt slot yields the default
/// state and a message saying why. `None` means the stored state was used.
pub fn load_state(store: &dyn KvStore) -> (GameState, Option<String>) {
    load_state_or(store, GameState::default())
}

/// Like [`load_state`], seating a fresh game with `rules.default_player_names`.
pub fn load_state_for_rules(store: &dyn KvStore, rules: &Rules) -> (GameState, Option<String>) {
    load_state_or(store, GameState::for_rules(rules))
}

fn load_state_or(store: &dyn KvStore, fallback: GameState) -> (GameState, Option<String>) {
    match store.get(STATE_KEY) {
        Ok(Some(bytes)) => match decode_state(&bytes) {
            Ok(state) => (state, None),
            Err(e) => (
                fallback,
                Some(format!("Failed to parse {STATE_KEY}: {e}; using default state")),
            ),
        },
        Ok(None) => (fallback, Some(format!("No {STATE_KEY} saved; using default state"))),
        Err(e) => (
            fallback,
            Some(format!("Failed to read {STATE_KEY}: {e}; using default state")),
        ),
    }
}

pub fn save_state(store: &mut dyn KvStore, state: &GameState) -> Result<(), StoreError> {
    let bytes = encode_state(state)?;
    store.set(STATE_KEY, &bytes)
}
