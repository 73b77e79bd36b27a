//! mj-store: persistence and session wiring around `mj-core`.
//!
//! The core never touches storage. This crate owns the key-value contract,
//! the tolerant load / wholesale save of `GameState`, and a `Scorekeeper`
//! session that a front end drives.

pub mod kv;
pub mod persist;
pub mod session;

pub use kv::{cleanup_tmp_files, FileStore, KvStore, MemoryStore, StoreError};
pub use persist::{
    decode_state, encode_state, load_state, load_state_for_rules, save_state, STATE_KEY,
};
pub use session::{Scorekeeper, SessionError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
