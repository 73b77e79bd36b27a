//! mj-logging: NDJSON event log for score sessions.
//!
//! Append-only, one JSON object per line. Every event carries the schema
//! version and a blake3 hash of the serialized game state it produced, so a
//! log can be checked against a saved state after the fact.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_state_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCommittedV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: u32,

    pub round_index: usize,
    pub label: String,
    pub deltas: Vec<i32>,
    pub totals: Vec<i64>,
    pub state_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundUndoneV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: u32,

    /// `None` when the history was already empty.
    pub removed: Option<Vec<i32>>,
    pub rounds_left: usize,
    pub state_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRenamedV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: u32,

    pub seat: usize,
    pub name: String,
    pub state_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResetV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: u32,

    pub rounds_discarded: usize,
    pub state_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateLoadedV1 {
    pub event: String,
    pub ts_ms: u64,
    pub v: u32,

    pub rounds: usize,
    /// Why the default state was used instead of the stored one.
    pub fallback: Option<String>,
    pub state_hash: String,
}

impl RoundCommittedV1 {
    pub fn new(round_index: usize, label: String, deltas: Vec<i32>, totals: Vec<i64>, state_hash: String) -> Self {
        Self {
            event: "round_committed".to_string(),
            ts_ms: now_ms(),
            v: EVENT_SCHEMA_VERSION,
            round_index,
            label,
            deltas,
            totals,
            state_hash,
        }
    }
}

impl RoundUndoneV1 {
    pub fn new(removed: Option<Vec<i32>>, rounds_left: usize, state_hash: String) -> Self {
        Self {
            event: "round_undone".to_string(),
            ts_ms: now_ms(),
            v: EVENT_SCHEMA_VERSION,
            removed,
            rounds_left,
            state_hash,
        }
    }
}

impl PlayerRenamedV1 {
    pub fn new(seat: usize, name: String, state_hash: String) -> Self {
        Self {
            event: "player_renamed".to_string(),
            ts_ms: now_ms(),
            v: EVENT_SCHEMA_VERSION,
            seat,
            name,
            state_hash,
        }
    }
}

impl StateResetV1 {
    pub fn new(rounds_discarded: usize, state_hash: String) -> Self {
        Self {
            event: "state_reset".to_string(),
            ts_ms: now_ms(),
            v: EVENT_SCHEMA_VERSION,
            rounds_discarded,
            state_hash,
        }
    }
}

impl StateLoadedV1 {
    pub fn new(rounds: usize, fallback: Option<String>, state_hash: String) -> Self {
        Self {
            event: "state_loaded".to_string(),
            ts_ms: now_ms(),
            v: EVENT_SCHEMA_VERSION,
            rounds,
            fallback,
            state_hash,
        }
    }
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("ndjson io: {0}")]
    Io(#[from] io::Error),
    #[error("ndjson json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append, flushing after every line.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 1)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Read every parseable line; a torn trailing line is skipped.
pub fn read_events_lenient(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}
